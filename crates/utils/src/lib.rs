pub mod checksum;
pub mod path;
pub mod sanitize;
pub mod errors;

pub use checksum::*;
pub use path::*;
pub use sanitize::*;
pub use errors::*;
