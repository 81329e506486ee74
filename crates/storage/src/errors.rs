use folio_utils::UtilsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid gallery name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("Invalid upload target: {0}")]
    InvalidTarget(#[from] UtilsError),
}
