mod cleanup;
mod errors;
mod name;
mod permissions;
mod resolver;
mod store;

pub use errors::*;
pub use name::GalleryName;
pub use resolver::{
    classify_image_reference, gallery_base_url, resolve_gallery_image_url, resolve_gallery_images,
    UPLOADS_URL_ROOT,
};
pub use store::GalleryStore;
