use pano_store::StoreError;
use thiserror::Error;

/// Errors that can occur within the status engine.
///
/// Status queries themselves never fail; only the explicit mutating
/// operations (manual rotation) return these.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Loading or saving the board document failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
