mod models;
mod state;
mod health;
mod galleries;
mod multipart;
mod uploads;
pub mod files;

pub use models::AppState;
pub use health::health;
pub use galleries::{delete_gallery, ensure_gallery, rename_gallery, resolve_images, upload_gallery_images};
pub use uploads::upload_to_target;
pub use files::serve_file;
