//! Forgiving field deserializers for the board document.
//!
//! The document is hand-edited through the admin panel and by hand, so a
//! single bad value (a `null` time, a number where a name belongs, an
//! unknown weekday key) must only blank or drop that one value. Resolvers
//! already treat blank strings as "nothing there".

use std::collections::BTreeMap;

use pano_core::Weekday;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// A string field; `null` and non-string values become `""`.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_or_blank(Value::deserialize(deserializer)?))
}

/// A week counter; accepts a number or a numeric string, anything else is 0.
pub fn week<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let week = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        Value::Null => Some(0),
        _ => None,
    };
    Ok(week.unwrap_or_else(|| {
        debug!("unreadable week marker treated as never stamped");
        0
    }))
}

/// A list whose unreadable entries are dropped instead of failing the list.
pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            debug!(value = %other, "expected a list, ignoring");
            return Ok(Vec::new());
        }
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(error = %e, "dropping unreadable list entry");
                None
            }
        })
        .collect())
}

/// `{weekday: name}`; unknown day keys are dropped, bad names blanked.
pub fn weekday_names<'de, D>(deserializer: D) -> Result<BTreeMap<Weekday, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(weekday_map(Value::deserialize(deserializer)?, string_or_blank))
}

/// `{weekday: [label, ...]}`; unknown day keys are dropped, bad labels
/// blanked in place so later positions keep their index.
pub fn weekday_lists<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<Weekday, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(weekday_map(Value::deserialize(deserializer)?, |value| match value {
        Value::Array(items) => items.into_iter().map(string_or_blank).collect(),
        Value::Null => Vec::new(),
        other => {
            debug!(value = %other, "expected a list of labels, ignoring");
            Vec::new()
        }
    }))
}

fn weekday_map<T>(raw: Value, convert: impl Fn(Value) -> T) -> BTreeMap<Weekday, T> {
    let map = match raw {
        Value::Object(map) => map,
        Value::Null => return BTreeMap::new(),
        other => {
            debug!(value = %other, "expected a weekday mapping, ignoring");
            return BTreeMap::new();
        }
    };
    map.into_iter()
        .filter_map(|(key, value)| match key.parse::<Weekday>() {
            Ok(day) => Some((day, convert(value))),
            Err(e) => {
                debug!(error = %e, "dropping entry with unknown weekday");
                None
            }
        })
        .collect()
}

fn string_or_blank(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => {
            debug!(value = %other, "non-string value blanked");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "string")]
        name: String,
        #[serde(default, deserialize_with = "week")]
        week: u32,
        #[serde(default, deserialize_with = "weekday_names")]
        names: BTreeMap<Weekday, String>,
        #[serde(default, deserialize_with = "weekday_lists")]
        lists: BTreeMap<Weekday, Vec<String>>,
        #[serde(default, deserialize_with = "seq")]
        numbers: Vec<u32>,
    }

    fn parse(json: &str) -> Fields {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn strings_blank_null_and_non_string() {
        assert_eq!(parse(r#"{"name": null}"#).name, "");
        assert_eq!(parse(r#"{"name": 800}"#).name, "");
        assert_eq!(parse(r#"{"name": "08:00"}"#).name, "08:00");
        assert_eq!(parse("{}").name, "");
    }

    #[test]
    fn week_accepts_numeric_strings() {
        assert_eq!(parse(r#"{"week": 12}"#).week, 12);
        assert_eq!(parse(r#"{"week": "12"}"#).week, 12);
        assert_eq!(parse(r#"{"week": null}"#).week, 0);
        assert_eq!(parse(r#"{"week": -3}"#).week, 0);
    }

    #[test]
    fn weekday_names_drop_unknown_days_and_blank_nulls() {
        let names = parse(r#"{"names": {"Monday": "Ali", "friday": null, "Pazartesi": "Ayşe"}}"#).names;
        assert_eq!(names.len(), 2);
        assert_eq!(names[&Weekday::Monday], "Ali");
        assert_eq!(names[&Weekday::Friday], "");
    }

    #[test]
    fn weekday_lists_keep_positions() {
        let lists = parse(r#"{"lists": {"Tuesday": ["Fizik", null, "Kimya"], "Friday": "Tarih"}}"#).lists;
        assert_eq!(lists[&Weekday::Tuesday], vec!["Fizik", "", "Kimya"]);
        assert!(lists[&Weekday::Friday].is_empty());
    }

    #[test]
    fn seq_drops_only_bad_entries() {
        assert_eq!(parse(r#"{"numbers": [1, "two", 3]}"#).numbers, vec![1, 3]);
        assert!(parse(r#"{"numbers": {"a": 1}}"#).numbers.is_empty());
    }
}
