use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("API error: {0}")]
    ApiError(String),
}
