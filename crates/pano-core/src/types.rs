use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PanoError;

/// Fixed, locale-independent day ordering (Monday = 0 … Sunday = 6).
///
/// Serialised as the English day name; these are the keys used inside the
/// persisted document regardless of the display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// 0-based position, Monday first.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        Weekday::ALL[day.num_days_from_monday() as usize]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Weekday {
    type Err = PanoError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PanoError::InvalidWeekday(s.to_string()))
    }
}

/// Presentation settings handed to the resolvers explicitly.
///
/// Nothing in the engine reads process locale or globals; everything that
/// varies by school or language lives here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayContext {
    /// Status label when no slot contains the current time.
    #[serde(default = "default_outside_label")]
    pub outside_label: String,
    /// A slot is a teaching period iff its name contains one of these.
    #[serde(default = "default_lesson_markers")]
    pub lesson_markers: Vec<String>,
    /// Display names Monday..Sunday.
    #[serde(default = "default_day_names")]
    pub day_names: Vec<String>,
}

impl DisplayContext {
    pub fn is_teaching(&self, slot_name: &str) -> bool {
        self.lesson_markers
            .iter()
            .any(|m| !m.is_empty() && slot_name.contains(m.as_str()))
    }

    /// Localised name for `day`, falling back to the English key when the
    /// configured list is short.
    pub fn day_name(&self, day: Weekday) -> &str {
        self.day_names
            .get(day.index())
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(day.as_str())
    }
}

impl Default for DisplayContext {
    fn default() -> Self {
        Self {
            outside_label: default_outside_label(),
            lesson_markers: default_lesson_markers(),
            day_names: default_day_names(),
        }
    }
}

fn default_outside_label() -> String {
    "Ders Dışı".to_string()
}

fn default_lesson_markers() -> Vec<String> {
    vec!["Ders".to_string(), "Etüt".to_string()]
}

fn default_day_names() -> Vec<String> {
    [
        "Pazartesi",
        "Salı",
        "Çarşamba",
        "Perşembe",
        "Cuma",
        "Cumartesi",
        "Pazar",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_from_chrono_is_monday_first() {
        assert_eq!(Weekday::from(chrono::Weekday::Mon), Weekday::Monday);
        assert_eq!(Weekday::from(chrono::Weekday::Sun), Weekday::Sunday);
        assert_eq!(Weekday::Sunday.index(), 6);
    }

    #[test]
    fn weekday_serializes_as_english_name() {
        let json = serde_json::to_string(&Weekday::Wednesday).unwrap();
        assert_eq!(json, r#""Wednesday""#);
        let back: Weekday = serde_json::from_str(r#""Friday""#).unwrap();
        assert_eq!(back, Weekday::Friday);
    }

    #[test]
    fn weekday_parse_is_case_insensitive() {
        assert_eq!("monday".parse::<Weekday>().unwrap(), Weekday::Monday);
        assert!("Pazartesi".parse::<Weekday>().is_err());
    }

    #[test]
    fn teaching_marker_matches_substring() {
        let ctx = DisplayContext::default();
        assert!(ctx.is_teaching("1. Ders"));
        assert!(ctx.is_teaching("Akşam Etüt"));
        assert!(!ctx.is_teaching("Teneffüs"));
        assert!(!ctx.is_teaching("Öğle Arası"));
    }

    #[test]
    fn empty_marker_never_matches() {
        let ctx = DisplayContext {
            lesson_markers: vec![String::new()],
            ..DisplayContext::default()
        };
        assert!(!ctx.is_teaching("anything"));
    }

    #[test]
    fn day_name_falls_back_to_english() {
        let ctx = DisplayContext {
            day_names: vec!["Lundi".to_string()],
            ..DisplayContext::default()
        };
        assert_eq!(ctx.day_name(Weekday::Monday), "Lundi");
        assert_eq!(ctx.day_name(Weekday::Tuesday), "Tuesday");
        assert_eq!(DisplayContext::default().day_name(Weekday::Thursday), "Perşembe");
    }
}
