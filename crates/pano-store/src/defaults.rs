//! The default template every loaded document is merged over.

use crate::types::{
    ConfigDocument, Countdown, LayoutCard, RotationState, Slideshow, TimeSlot,
};

/// Typical school day: 40-minute lessons, 10-minute breaks, one lunch break.
const DEFAULT_SLOTS: &[(&str, &str, &str)] = &[
    ("1. Ders", "08:30", "09:10"),
    ("Teneffüs", "09:10", "09:20"),
    ("2. Ders", "09:20", "10:00"),
    ("Teneffüs", "10:00", "10:10"),
    ("3. Ders", "10:10", "10:50"),
    ("Teneffüs", "10:50", "11:00"),
    ("4. Ders", "11:00", "11:40"),
    ("Öğle Arası", "11:40", "12:30"),
    ("5. Ders", "12:30", "13:10"),
    ("Teneffüs", "13:10", "13:20"),
    ("6. Ders", "13:20", "14:00"),
    ("Teneffüs", "14:00", "14:10"),
    ("7. Ders", "14:10", "14:50"),
];

/// `(id, title, type)` of the dashboard cards, in display order.
const DEFAULT_CARDS: &[(&str, &str, &str)] = &[
    ("card-status", "Durum", "status"),
    ("card-duty", "Nöbetçi Öğretmenler", "duty"),
    ("card-quote", "Günün Sözü", "quote"),
    ("card-countdown", "Geri Sayım", "countdown"),
    ("card-birthdays", "Doğum Günleri", "birthdays"),
    ("card-classes", "Sınıf Durumları", "classes"),
];

pub fn default_schedule() -> Vec<TimeSlot> {
    DEFAULT_SLOTS
        .iter()
        .map(|(name, start, end)| TimeSlot::new(*name, *start, *end))
        .collect()
}

pub fn default_layout() -> Vec<LayoutCard> {
    DEFAULT_CARDS
        .iter()
        .map(|(id, title, kind)| LayoutCard {
            id: id.to_string(),
            title: title.to_string(),
            visible: true,
            kind: kind.to_string(),
        })
        .collect()
}

/// The document written on first start.
///
/// Rotation starts disabled with an unstamped marker; rosters, timetables
/// and birthdays start empty.
pub fn default_document() -> ConfigDocument {
    ConfigDocument {
        school_name: "Okul Adı".to_string(),
        schedule: default_schedule(),
        duty_rotation: RotationState::default(),
        messages: vec!["Hoş geldiniz!".to_string()],
        countdown: Countdown {
            label: "Geri Sayım".to_string(),
            target_date: None,
        },
        slideshow: Slideshow::default(),
        layout: default_layout(),
        ..ConfigDocument::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pano_core::DisplayContext;

    #[test]
    fn default_schedule_slots_are_well_formed() {
        let slots = default_schedule();
        assert!(slots.iter().all(|s| s.bounds().is_some()));
        // chronological: every slot starts where (or after) the previous ended
        for pair in slots.windows(2) {
            assert!(pair[0].bounds().unwrap().1 <= pair[1].bounds().unwrap().0);
        }
    }

    #[test]
    fn default_schedule_has_seven_lessons() {
        let ctx = DisplayContext::default();
        let lessons = default_schedule()
            .iter()
            .filter(|s| ctx.is_teaching(&s.name))
            .count();
        assert_eq!(lessons, 7);
    }

    #[test]
    fn default_layout_ids_are_unique() {
        let layout = default_layout();
        let mut ids: Vec<_> = layout.iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), layout.len());
    }
}
