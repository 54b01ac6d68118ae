//! `pano-store` — the persisted board document.
//!
//! # Overview
//!
//! The whole board (time slots, duty roster, rotation bookkeeping, class
//! timetables, birthdays and display settings) is one JSON document on disk.
//! [`store::ConfigStore`], the file-backed [`store::DocumentStore`], reads it
//! fresh on every call, merges it over the
//! default template (see [`defaults`]) and writes it back atomically.
//!
//! # Load pipeline
//!
//! | Step              | Behaviour                                              |
//! |-------------------|--------------------------------------------------------|
//! | absent / empty    | default template is written and returned               |
//! | legacy schedule   | keyed `{name: {start, end}}` map becomes an ordered list |
//! | default merge     | missing keys filled key-wise, nested maps recursively  |
//! | layout repair     | default cards restored by `id`, user order kept        |
//! | field values      | bad values blanked or dropped one by one ([`lenient`]) |

pub mod defaults;
pub mod error;
pub mod lenient;
pub mod merge;
pub mod store;
pub mod types;

pub use error::{Result, StoreError};
pub use store::{ConfigStore, DocumentStore};
pub use types::{
    Birthday, ClassSchedule, ConfigDocument, Countdown, DutyEntry, LayoutCard, Quote,
    RotationState, Slideshow, TimeSlot,
};
