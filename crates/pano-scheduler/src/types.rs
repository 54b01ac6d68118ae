use pano_store::{Countdown, Quote, Slideshow, StoreError};
use serde::{Deserialize, Serialize};

/// Where the current minute falls in the day's slot list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodStatus {
    /// Name of the active slot, or the "outside hours" label.
    pub label: String,
    pub is_teaching: bool,
    /// 0-based teaching-period index; `None` unless `is_teaching`.
    pub lesson_index: Option<usize>,
}

impl PeriodStatus {
    /// 1-based number shown on the board; 0 outside teaching periods.
    pub fn lesson_number(&self) -> u32 {
        self.lesson_index.map_or(0, |i| i as u32 + 1)
    }
}

/// Result of one pass of the weekly rotation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RotationOutcome {
    /// `auto_rotate` is off; nothing looked at or changed.
    Disabled,
    /// First observation: the marker was stamped, no rotation performed.
    Initialized { week: u32 },
    /// The week changed since the marker; one rotation applied.
    Rotated { from_week: u32, to_week: u32 },
    /// The marker already matches this week.
    Current { week: u32 },
}

impl RotationOutcome {
    /// Whether the document changed and must be persisted.
    pub fn mutated(&self) -> bool {
        matches!(
            self,
            RotationOutcome::Initialized { .. } | RotationOutcome::Rotated { .. }
        )
    }
}

impl std::fmt::Display for RotationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RotationOutcome::Disabled => write!(f, "disabled"),
            RotationOutcome::Initialized { week } => write!(f, "initialized at week {week}"),
            RotationOutcome::Rotated { from_week, to_week } => {
                write!(f, "rotated (week {from_week} -> {to_week})")
            }
            RotationOutcome::Current { week } => write!(f, "current (week {week})"),
        }
    }
}

/// One response for the display front end.
///
/// Field names are the wire contract of the status endpoint; do not rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub status: String,
    pub is_lesson: bool,
    pub lesson_number: u32,
    pub duty_teachers: Vec<String>,
    pub class_statuses: Vec<String>,
    pub next_class_statuses: Vec<String>,
    pub birthdays: Vec<String>,
    pub date: String,
    pub time: String,
    pub day: String,
    pub messages: Vec<String>,
    pub quotes: Vec<Quote>,
    pub countdown: Countdown,
    pub slideshow: Slideshow,
}

/// A snapshot plus what happened to the persisted document on the way.
#[derive(Debug)]
pub struct StatusOutcome {
    pub snapshot: Snapshot,
    /// `None` when the document could not be loaded and defaults were used.
    pub rotation: Option<RotationOutcome>,
    /// Set when the document could not be read; the snapshot is built from
    /// the default template and nothing is written.
    pub load_error: Option<StoreError>,
    /// Set when a rotation was computed but could not be written. The
    /// marker on disk is unchanged, so the rotation is retried next query.
    pub save_error: Option<StoreError>,
}
