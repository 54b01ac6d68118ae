use chrono::{NaiveTime, Timelike};
use pano_core::DisplayContext;
use pano_store::TimeSlot;
use tracing::debug;

use crate::types::PeriodStatus;

/// Slot boundaries carry minute precision, so `now` is compared as HH:MM.
fn to_minute(now: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now)
}

/// Find the active slot for `now`.
///
/// The first slot (in list order) whose inclusive `[start, end]` range
/// contains `now` wins. Teaching periods are counted in list order to
/// produce the lesson index; a slot with unparseable times never matches
/// but a teaching one still occupies its position in the count, so class
/// timetables stay aligned.
pub fn resolve_period(now: NaiveTime, slots: &[TimeSlot], ctx: &DisplayContext) -> PeriodStatus {
    let now = to_minute(now);
    let mut teaching_seen = 0usize;

    for slot in slots {
        let teaching = ctx.is_teaching(&slot.name);
        match slot.bounds() {
            Some((start, end)) if start <= now && now <= end => {
                return PeriodStatus {
                    label: slot.name.clone(),
                    is_teaching: teaching,
                    lesson_index: teaching.then_some(teaching_seen),
                };
            }
            Some(_) => {}
            None => debug!(slot = %slot.name, start = %slot.start, end = %slot.end, "skipping malformed slot"),
        }
        if teaching {
            teaching_seen += 1;
        }
    }

    PeriodStatus {
        label: ctx.outside_label.clone(),
        is_teaching: false,
        lesson_index: None,
    }
}

/// Teaching-period index of the first lesson starting strictly after `now`.
///
/// Slots are taken in list order; the data owner keeps them chronological.
pub fn next_teaching_index(now: NaiveTime, slots: &[TimeSlot], ctx: &DisplayContext) -> Option<usize> {
    let now = to_minute(now);
    slots
        .iter()
        .filter(|slot| ctx.is_teaching(&slot.name))
        .enumerate()
        .find_map(|(index, slot)| {
            let (start, _) = slot.bounds()?;
            (start > now).then_some(index)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(hhmm: &str) -> NaiveTime {
        NaiveTime::parse_from_str(hhmm, "%H:%M").unwrap()
    }

    fn day() -> Vec<TimeSlot> {
        vec![
            TimeSlot::new("1. Ders", "08:00", "08:40"),
            TimeSlot::new("Teneffüs", "08:40", "08:50"),
            TimeSlot::new("2. Ders", "08:50", "09:30"),
            TimeSlot::new("Öğle Arası", "09:30", "10:15"),
            TimeSlot::new("3. Ders", "10:15", "10:55"),
            TimeSlot::new("Akşam Etüt", "16:00", "16:40"),
        ]
    }

    #[test]
    fn inside_first_lesson() {
        let status = resolve_period(t("08:10"), &day(), &DisplayContext::default());
        assert_eq!(status.label, "1. Ders");
        assert!(status.is_teaching);
        assert_eq!(status.lesson_index, Some(0));
        assert_eq!(status.lesson_number(), 1);
    }

    #[test]
    fn lesson_index_skips_breaks() {
        let ctx = DisplayContext::default();
        assert_eq!(resolve_period(t("09:00"), &day(), &ctx).lesson_index, Some(1));
        assert_eq!(resolve_period(t("10:30"), &day(), &ctx).lesson_index, Some(2));
        // study periods count as teaching periods too
        assert_eq!(resolve_period(t("16:20"), &day(), &ctx).lesson_index, Some(3));
    }

    #[test]
    fn break_has_label_but_no_lesson() {
        let status = resolve_period(t("08:45"), &day(), &DisplayContext::default());
        assert_eq!(status.label, "Teneffüs");
        assert!(!status.is_teaching);
        assert_eq!(status.lesson_index, None);
        assert_eq!(status.lesson_number(), 0);
    }

    #[test]
    fn boundary_minute_goes_to_earlier_slot() {
        // 08:40 is both the end of lesson 1 and the start of the break
        let status = resolve_period(t("08:40"), &day(), &DisplayContext::default());
        assert_eq!(status.label, "1. Ders");
    }

    #[test]
    fn seconds_are_ignored() {
        let now = NaiveTime::from_hms_opt(8, 40, 59).unwrap();
        let status = resolve_period(now, &day(), &DisplayContext::default());
        assert_eq!(status.label, "1. Ders");
    }

    #[test]
    fn outside_hours_uses_sentinel() {
        let ctx = DisplayContext::default();
        let status = resolve_period(t("07:00"), &day(), &ctx);
        assert_eq!(status.label, ctx.outside_label);
        assert!(!status.is_teaching);
        assert_eq!(status.lesson_index, None);
    }

    #[test]
    fn empty_schedule_is_outside_hours() {
        let ctx = DisplayContext::default();
        let status = resolve_period(t("09:00"), &[], &ctx);
        assert_eq!(status.label, ctx.outside_label);
        assert_eq!(next_teaching_index(t("09:00"), &[], &ctx), None);
    }

    #[test]
    fn malformed_slot_is_skipped_but_keeps_its_position() {
        let slots = vec![
            TimeSlot::new("1. Ders", "8.00", "08:40"),
            TimeSlot::new("2. Ders", "08:50", "09:30"),
        ];
        let ctx = DisplayContext::default();
        assert_eq!(resolve_period(t("08:10"), &slots, &ctx).label, ctx.outside_label);
        assert_eq!(resolve_period(t("09:00"), &slots, &ctx).lesson_index, Some(1));
    }

    #[test]
    fn overlapping_slots_resolve_by_list_order() {
        let slots = vec![
            TimeSlot::new("Teneffüs", "08:00", "09:00"),
            TimeSlot::new("1. Ders", "08:00", "08:40"),
        ];
        let status = resolve_period(t("08:10"), &slots, &DisplayContext::default());
        assert_eq!(status.label, "Teneffüs");
        assert!(!status.is_teaching);
    }

    #[test]
    fn resolution_is_deterministic() {
        let ctx = DisplayContext::default();
        let first = resolve_period(t("09:10"), &day(), &ctx);
        for _ in 0..10 {
            assert_eq!(resolve_period(t("09:10"), &day(), &ctx), first);
        }
    }

    #[test]
    fn next_lesson_during_break() {
        let ctx = DisplayContext::default();
        assert_eq!(next_teaching_index(t("08:45"), &day(), &ctx), Some(1));
        assert_eq!(next_teaching_index(t("09:45"), &day(), &ctx), Some(2));
        assert_eq!(next_teaching_index(t("07:00"), &day(), &ctx), Some(0));
    }

    #[test]
    fn no_next_lesson_after_last_start() {
        let ctx = DisplayContext::default();
        assert_eq!(next_teaching_index(t("16:00"), &day(), &ctx), None);
        assert_eq!(next_teaching_index(t("18:00"), &day(), &ctx), None);
    }

    #[test]
    fn custom_markers_change_classification() {
        let ctx = DisplayContext {
            lesson_markers: vec!["Lesson".to_string(), "Study".to_string()],
            ..DisplayContext::default()
        };
        let slots = vec![
            TimeSlot::new("Lesson 1", "08:00", "08:40"),
            TimeSlot::new("1. Ders", "08:40", "09:20"),
        ];
        assert!(resolve_period(t("08:10"), &slots, &ctx).is_teaching);
        assert!(!resolve_period(t("09:00"), &slots, &ctx).is_teaching);
    }
}
