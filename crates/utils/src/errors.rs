use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum UtilsError {
    #[error("Invalid target id: {0}")]
    InvalidTargetId(String),
}
