//! Turning whatever is on disk into a complete [`ConfigDocument`].
//!
//! All tolerance for old or partially filled documents lives here, once, at
//! load time. The resolvers only ever see a fully typed document.

use serde_json::{Map, Value};
use tracing::debug;

use crate::defaults::{default_document, default_layout};
use crate::types::{ConfigDocument, LayoutCard};

/// Legacy schedule key for the lunch break.
const LEGACY_LUNCH_KEY: &str = "oglen_arasi";

/// Fill keys missing from `target` with the value from `defaults`.
///
/// Objects are merged key-wise and recursively; arrays and scalars present
/// in `target` win as a whole. An explicit `null` counts as missing.
pub fn merge_defaults(target: &mut Value, defaults: &Value) {
    if target.is_null() {
        *target = defaults.clone();
        return;
    }
    if let (Value::Object(target), Value::Object(defaults)) = (target, defaults) {
        for (key, default_value) in defaults {
            match target.get_mut(key) {
                Some(existing) => merge_defaults(existing, default_value),
                None => {
                    target.insert(key.clone(), default_value.clone());
                }
            }
        }
    }
}

/// Rewrite a keyed `{"1": {"start", "end"}, …}` schedule into the ordered
/// list form, keeping the map's insertion order.
pub fn normalize_legacy_schedule(doc: &mut Value) {
    let Some(Value::Object(map)) = doc.get("schedule") else {
        return;
    };

    let slots: Vec<Value> = map
        .iter()
        .map(|(key, times)| {
            let mut slot = Map::new();
            slot.insert("name".to_string(), Value::String(legacy_slot_name(key)));
            for bound in ["start", "end"] {
                let text = times.get(bound).and_then(Value::as_str).unwrap_or_default();
                slot.insert(bound.to_string(), Value::String(text.to_string()));
            }
            Value::Object(slot)
        })
        .collect();

    debug!(slots = slots.len(), "normalised legacy keyed schedule");
    doc["schedule"] = Value::Array(slots);
}

/// Display name the board historically showed for a legacy schedule key.
fn legacy_slot_name(key: &str) -> String {
    if key == LEGACY_LUNCH_KEY {
        "Öğle Arası".to_string()
    } else if !key.is_empty() && key.chars().all(|c| c.is_ascii_digit()) {
        format!("{key}. Ders")
    } else {
        key.to_string()
    }
}

/// Restore the default dashboard cards by `id`.
///
/// Known cards keep their position and visibility but get an empty title or
/// type filled back in; unknown cards pass through; missing defaults are
/// appended in default order.
pub fn repair_layout(current: Vec<LayoutCard>) -> Vec<LayoutCard> {
    let defaults = default_layout();
    let mut repaired: Vec<LayoutCard> = current
        .into_iter()
        .map(|mut card| {
            if let Some(default) = defaults.iter().find(|d| d.id == card.id) {
                if card.title.trim().is_empty() {
                    card.title = default.title.clone();
                }
                if card.kind.trim().is_empty() {
                    card.kind = default.kind.clone();
                }
            }
            card
        })
        .collect();

    for default in defaults {
        if !repaired.iter().any(|c| c.id == default.id) {
            repaired.push(default);
        }
    }
    repaired
}

/// Full load pipeline for a parsed JSON value.
pub fn document_from_value(mut raw: Value) -> serde_json::Result<ConfigDocument> {
    if !raw.is_object() {
        return Err(serde::de::Error::custom("document root must be a JSON object"));
    }
    normalize_legacy_schedule(&mut raw);

    let template = serde_json::to_value(default_document())?;
    merge_defaults(&mut raw, &template);

    let mut doc: ConfigDocument = serde_json::from_value(raw)?;
    doc.layout = repair_layout(std::mem::take(&mut doc.layout));
    Ok(doc)
}
