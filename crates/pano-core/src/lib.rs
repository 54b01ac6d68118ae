//! `pano-core` — settings, error type and calendar vocabulary shared by the
//! status board crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::PanoConfig;
pub use error::{PanoError, Result};
pub use types::{DisplayContext, Weekday};
