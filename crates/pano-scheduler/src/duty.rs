use std::collections::BTreeMap;

use pano_core::Weekday;
use pano_store::DutyEntry;

/// `"location: person"` for every roster entry staffed on `day`, in roster
/// order. Unstaffed locations are left out.
pub fn resolve_duty(roster: &[DutyEntry], day: Weekday) -> Vec<String> {
    roster
        .iter()
        .filter_map(|entry| {
            entry
                .person_on(day)
                .map(|person| format!("{}: {}", entry.location, person))
        })
        .collect()
}

/// Ready-made duty lines from documents that predate the roster.
pub fn legacy_duty(lines: &BTreeMap<Weekday, Vec<String>>, day: Weekday) -> Vec<String> {
    lines
        .get(&day)
        .into_iter()
        .flatten()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
