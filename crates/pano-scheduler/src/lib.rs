//! `pano-scheduler` — status and duty-rotation resolution for the board.
//!
//! # Overview
//!
//! Given a point in time and the persisted board document, the
//! [`engine::StatusEngine`] derives which slot of the day is active, which
//! lesson each class is in (or is heading to), who is on duty, whose
//! birthday it is, and whether the weekly duty rotation is due.
//!
//! # Pieces
//!
//! | Module     | Behaviour                                                   |
//! |------------|-------------------------------------------------------------|
//! | `period`   | active slot + teaching-period index; next lesson lookahead  |
//! | `duty`     | "location: person" lines for a weekday                      |
//! | `rotation` | ISO-week guarded, per-weekday circular roster rotation      |
//! | `engine`   | load → rotate/persist → resolve → [`Snapshot`]              |
//!
//! `now` is always passed in by the caller and read once per query.

pub mod duty;
pub mod engine;
pub mod error;
pub mod period;
pub mod rotation;
pub mod types;

pub use engine::{build_snapshot, StatusEngine};
pub use error::{Result, SchedulerError};
pub use types::{PeriodStatus, RotationOutcome, Snapshot, StatusOutcome};
