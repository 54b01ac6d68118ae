use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use pano_core::Weekday;
use serde::{Deserialize, Serialize};

use crate::lenient;

/// Clock format used for slot boundaries in the document.
pub const SLOT_TIME_FORMAT: &str = "%H:%M";

/// A named interval of the school day (lesson, break, lunch …).
///
/// Boundaries stay as the strings the admin typed (`null` or a number
/// becomes `""`) so that one malformed slot does not make the whole
/// document unreadable; they are parsed on demand by [`TimeSlot::bounds`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub start: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub end: String,
}

impl TimeSlot {
    pub fn new(name: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: start.into(),
            end: end.into(),
        }
    }

    /// Parsed `(start, end)`; `None` if either side is malformed or the slot
    /// would wrap past midnight (`start > end`).
    pub fn bounds(&self) -> Option<(NaiveTime, NaiveTime)> {
        let start = NaiveTime::parse_from_str(self.start.trim(), SLOT_TIME_FORMAT).ok()?;
        let end = NaiveTime::parse_from_str(self.end.trim(), SLOT_TIME_FORMAT).ok()?;
        (start <= end).then_some((start, end))
    }
}

/// One supervised location and who covers it on each weekday.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DutyEntry {
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::weekday_names")]
    pub schedule: BTreeMap<Weekday, String>,
}

impl DutyEntry {
    /// Person on duty for `day`, if any non-blank name is assigned.
    pub fn person_on(&self, day: Weekday) -> Option<&str> {
        self.schedule
            .get(&day)
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
    }
}

/// Bookkeeping for the weekly duty rotation.
///
/// `last_week_number == 0` means the marker was never stamped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RotationState {
    #[serde(default)]
    pub auto_rotate: bool,
    #[serde(default, deserialize_with = "lenient::week")]
    pub last_week_number: u32,
    /// ISO week-year of the stamp. Absent in documents written before it
    /// was tracked; only the week number is compared then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_week_year: Option<i32>,
}

/// A class and its lessons per weekday.
///
/// Position `n` of a day's list is the label of the n-th teaching period of
/// that day, regardless of breaks between periods.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassSchedule {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::weekday_lists")]
    pub program: BTreeMap<Weekday, Vec<String>>,
}

impl ClassSchedule {
    /// Non-blank lesson label at teaching-period `index` on `day`.
    pub fn lesson_at(&self, day: Weekday, index: usize) -> Option<&str> {
        self.program
            .get(&day)?
            .get(index)
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Birthday {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    /// `DD.MM` or `DD.MM.YYYY`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: String,
}

/// A line of the "quote of the day" card, either bare text or attributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quote {
    Plain(String),
    Attributed {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        author: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Countdown {
    #[serde(default)]
    pub label: String,
    /// `YYYY-MM-DD`, optionally followed by `THH:MM` or ` HH:MM`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
}

impl Countdown {
    /// Whole days left until the target, rounded up; `Some(0)` once reached.
    /// `None` when no target is set or it cannot be parsed.
    pub fn days_remaining(&self, now: NaiveDateTime) -> Option<i64> {
        let target = parse_target(self.target_date.as_deref()?.trim())?;
        let secs = (target - now).num_seconds();
        if secs <= 0 {
            return Some(0);
        }
        Some((secs + 86_399) / 86_400)
    }
}

fn parse_target(raw: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            ["%Y-%m-%d", "%d.%m.%Y"]
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slideshow {
    /// Seconds each slide stays on screen.
    #[serde(default = "default_slide_duration")]
    pub duration: u32,
}

impl Default for Slideshow {
    fn default() -> Self {
        Self {
            duration: default_slide_duration(),
        }
    }
}

fn default_slide_duration() -> u32 {
    10
}

/// One card of the dashboard grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutCard {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "bool_true")]
    pub visible: bool,
    #[serde(rename = "type", default)]
    pub kind: String,
}

fn bool_true() -> bool {
    true
}

/// The persisted board document (aggregate root).
///
/// Keys this version does not know are kept in `extra` and written back
/// unchanged, so documents edited by other versions survive a save.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default)]
    pub school_name: String,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub schedule: Vec<TimeSlot>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub duty_roster: Vec<DutyEntry>,
    #[serde(default)]
    pub duty_rotation: RotationState,
    /// Pre-roster format: ready-made "location: person" lines per weekday.
    #[serde(
        default,
        deserialize_with = "lenient::weekday_lists",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub duty_teachers: BTreeMap<Weekday, Vec<String>>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub class_schedules: Vec<ClassSchedule>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub birthdays: Vec<Birthday>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub messages: Vec<String>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub quotes: Vec<Quote>,
    #[serde(default)]
    pub countdown: Countdown,
    #[serde(default)]
    pub slideshow: Slideshow,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub layout: Vec<LayoutCard>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
