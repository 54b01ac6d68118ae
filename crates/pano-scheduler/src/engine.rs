use std::sync::{Mutex, MutexGuard};

use chrono::{Datelike, NaiveDateTime};
use pano_core::{DisplayContext, Weekday};
use pano_store::{defaults::default_document, ConfigDocument, ConfigStore, DocumentStore};
use tracing::{error, info, instrument, warn};

use crate::{
    duty::{legacy_duty, resolve_duty},
    error::Result,
    period::{next_teaching_index, resolve_period},
    rotation::{force_rotate, maybe_rotate},
    types::{RotationOutcome, Snapshot, StatusOutcome},
};

/// Answers status queries against the persisted board document.
///
/// Holds no board state of its own: every query reloads the document, so
/// admin edits are visible on the next call.
pub struct StatusEngine<S = ConfigStore> {
    store: S,
    display: DisplayContext,
    /// Serialises load → rotate → save cycles run through this engine.
    write_lock: Mutex<()>,
}

impl<S: DocumentStore> StatusEngine<S> {
    pub fn new(store: S, display: DisplayContext) -> Self {
        Self {
            store,
            display,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn write_lock(&self) -> MutexGuard<'_, ()> {
        // The guarded value is `()`, so a poisoned lock carries no bad state.
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Build the snapshot for `now`, rotating the duty roster first if due.
    ///
    /// Never fails. A document that cannot be read is replaced by the
    /// default template for this response only (the file is not touched).
    /// A rotation whose write fails is still reflected in this snapshot but
    /// not on disk, so it is retried by the next query.
    #[instrument(skip(self), fields(now = %now))]
    pub fn status(&self, now: NaiveDateTime) -> StatusOutcome {
        let (doc, rotation, load_error, save_error) = {
            let _guard = self.write_lock();
            match self.store.load() {
                Ok(mut doc) => {
                    let rotation = maybe_rotate(&mut doc, now);
                    let save_error = if rotation.mutated() {
                        self.store.save(&doc).err()
                    } else {
                        None
                    };
                    if let Some(ref e) = save_error {
                        error!(error = %e, %rotation, "rotation could not be persisted");
                    }
                    (doc, Some(rotation), None, save_error)
                }
                Err(e) => {
                    warn!(error = %e, "board document unreadable, using defaults");
                    (default_document(), None, Some(e), None)
                }
            }
        };

        StatusOutcome {
            snapshot: build_snapshot(&doc, now, &self.display),
            rotation,
            load_error,
            save_error,
        }
    }

    /// Run the rotation now and persist the result.
    ///
    /// With `force` the roster rotates even if this week was already done;
    /// otherwise this is the same state machine a status query runs.
    pub fn rotate_now(&self, now: NaiveDateTime, force: bool) -> Result<RotationOutcome> {
        let _guard = self.write_lock();
        let mut doc = self.store.load()?;
        let outcome = if force {
            force_rotate(&mut doc, now)
        } else {
            maybe_rotate(&mut doc, now)
        };
        if outcome.mutated() {
            self.store.save(&doc)?;
        }
        info!(%outcome, force, "rotation requested");
        Ok(outcome)
    }
}

/// Assemble the display snapshot from an already-loaded document.
///
/// Pure: the same document, time and context always give the same snapshot.
pub fn build_snapshot(doc: &ConfigDocument, now: NaiveDateTime, ctx: &DisplayContext) -> Snapshot {
    let day = Weekday::from(now.weekday());
    let period = resolve_period(now.time(), &doc.schedule, ctx);

    let duty_teachers = if doc.duty_roster.is_empty() {
        legacy_duty(&doc.duty_teachers, day)
    } else {
        resolve_duty(&doc.duty_roster, day)
    };

    let (class_statuses, next_class_statuses) = match period.lesson_index {
        Some(index) if period.is_teaching => (class_lines(doc, day, index), Vec::new()),
        _ => {
            let next = next_teaching_index(now.time(), &doc.schedule, ctx)
                .map(|index| class_lines(doc, day, index))
                .unwrap_or_default();
            (Vec::new(), next)
        }
    };

    let today = now.format("%d.%m").to_string();
    let birthdays = doc
        .birthdays
        .iter()
        .filter(|b| b.date.trim().starts_with(&today))
        .map(|b| b.name.clone())
        .collect();

    Snapshot {
        lesson_number: period.lesson_number(),
        is_lesson: period.is_teaching,
        status: period.label,
        duty_teachers,
        class_statuses,
        next_class_statuses,
        birthdays,
        date: now.format("%d.%m.%Y").to_string(),
        time: now.format("%H:%M").to_string(),
        day: ctx.day_name(day).to_string(),
        messages: doc.messages.clone(),
        quotes: doc.quotes.clone(),
        countdown: doc.countdown.clone(),
        slideshow: doc.slideshow.clone(),
    }
}

/// `"class: lesson"` for each class with a lesson at `index` on `day`.
fn class_lines(doc: &ConfigDocument, day: Weekday, index: usize) -> Vec<String> {
    doc.class_schedules
        .iter()
        .filter_map(|class| {
            class
                .lesson_at(day, index)
                .map(|lesson| format!("{}: {}", class.name, lesson))
        })
        .collect()
}
