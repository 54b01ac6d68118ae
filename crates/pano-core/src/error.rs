use thiserror::Error;

#[derive(Debug, Error)]
pub enum PanoError {
    /// Settings could not be extracted from pano.toml / PANO_* variables.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A weekday key that is not one of the English day names.
    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),
}

pub type Result<T> = std::result::Result<T, PanoError>;
