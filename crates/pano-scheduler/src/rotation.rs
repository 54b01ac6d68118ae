use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDateTime};
use pano_core::Weekday;
use pano_store::{ConfigDocument, DutyEntry, RotationState};
use tracing::{debug, info};

use crate::types::RotationOutcome;

/// Advance the weekly duty rotation if the ISO week changed.
///
/// The marker in `doc.duty_rotation` is the only guard: calling this any
/// number of times within one ISO week rotates at most once. The first
/// observation after enabling only stamps the marker. A gap of several
/// weeks still rotates exactly once.
pub fn maybe_rotate(doc: &mut ConfigDocument, now: NaiveDateTime) -> RotationOutcome {
    if !doc.duty_rotation.auto_rotate {
        return RotationOutcome::Disabled;
    }

    let iso = now.iso_week();
    let (year, week) = (iso.year(), iso.week());
    let RotationState {
        last_week_number,
        last_week_year,
        ..
    } = doc.duty_rotation;

    if last_week_number == 0 {
        stamp(&mut doc.duty_rotation, year, week);
        info!(week, "duty rotation marker initialised");
        return RotationOutcome::Initialized { week };
    }

    // Documents without a stamped year compare the week number alone.
    let same_week = last_week_number == week && last_week_year.map_or(true, |y| y == year);
    if same_week {
        debug!(week, "duty rotation already current");
        return RotationOutcome::Current { week };
    }

    rotate_roster(&mut doc.duty_roster);
    stamp(&mut doc.duty_rotation, year, week);
    info!(
        from_week = last_week_number,
        to_week = week,
        locations = doc.duty_roster.len(),
        "duty roster rotated"
    );
    RotationOutcome::Rotated {
        from_week: last_week_number,
        to_week: week,
    }
}

/// Rotate once regardless of the marker, then stamp the current week.
///
/// Backs the manual "rotate now" action.
pub fn force_rotate(doc: &mut ConfigDocument, now: NaiveDateTime) -> RotationOutcome {
    let iso = now.iso_week();
    let from_week = doc.duty_rotation.last_week_number;
    rotate_roster(&mut doc.duty_roster);
    stamp(&mut doc.duty_rotation, iso.year(), iso.week());
    info!(from_week, to_week = iso.week(), "duty roster rotated manually");
    RotationOutcome::Rotated {
        from_week,
        to_week: iso.week(),
    }
}

/// Circular right shift of the assigned people, one weekday at a time.
///
/// For each weekday the person at the last location moves to the first and
/// everyone else moves down one location. Weekdays never mix: Monday's
/// column rotates on its own, Tuesday's on its own. Fewer than two
/// locations is a no-op.
pub fn rotate_roster(roster: &mut [DutyEntry]) {
    if roster.len() < 2 {
        return;
    }

    let days: BTreeSet<Weekday> = roster
        .iter()
        .flat_map(|entry| entry.schedule.keys().copied())
        .collect();

    for day in days {
        let mut column: Vec<String> = roster
            .iter()
            .map(|entry| entry.schedule.get(&day).cloned().unwrap_or_default())
            .collect();
        column.rotate_right(1);
        for (entry, person) in roster.iter_mut().zip(column) {
            entry.schedule.insert(day, person);
        }
    }
}

fn stamp(state: &mut RotationState, year: i32, week: u32) {
    state.last_week_number = week;
    state.last_week_year = Some(year);
}
