//! Plain-text rendering of a snapshot for terminals and kiosk logs.

use std::fmt::Write;

use pano_scheduler::Snapshot;
use pano_store::Quote;

pub fn render_text(snap: &Snapshot, countdown_days: Option<i64>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {} {}", snap.day, snap.date, snap.time);

    if snap.is_lesson {
        let _ = writeln!(out, "Status: {} (lesson {})", snap.status, snap.lesson_number);
    } else {
        let _ = writeln!(out, "Status: {}", snap.status);
    }

    section(&mut out, "On duty", &snap.duty_teachers);
    if snap.is_lesson {
        section(&mut out, "Classes", &snap.class_statuses);
    } else {
        section(&mut out, "Next lesson", &snap.next_class_statuses);
    }
    section(&mut out, "Birthdays", &snap.birthdays);
    section(&mut out, "Messages", &snap.messages);

    if let Some(quote) = snap.quotes.first() {
        let _ = writeln!(out, "Quote: {}", quote_line(quote));
    }

    match countdown_days {
        Some(0) => {
            let _ = writeln!(out, "{}: expired", countdown_label(snap));
        }
        Some(days) => {
            let _ = writeln!(out, "{}: {} days left", countdown_label(snap), days);
        }
        None => {}
    }
    out
}

fn section(out: &mut String, title: &str, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    let _ = writeln!(out, "{title}:");
    for line in lines {
        let _ = writeln!(out, "  - {line}");
    }
}

fn quote_line(quote: &Quote) -> String {
    match quote {
        Quote::Plain(text) => text.clone(),
        Quote::Attributed {
            text,
            author: Some(author),
        } => format!("{text} ({author})"),
        Quote::Attributed { text, author: None } => text.clone(),
    }
}

fn countdown_label(snap: &Snapshot) -> &str {
    if snap.countdown.label.is_empty() {
        "Countdown"
    } else {
        &snap.countdown.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pano_store::{Countdown, Slideshow};

    fn snapshot() -> Snapshot {
        Snapshot {
            status: "2. Ders".to_string(),
            is_lesson: true,
            lesson_number: 2,
            duty_teachers: vec!["Bahçe: Ali".to_string()],
            class_statuses: vec!["9-A: Fizik".to_string()],
            next_class_statuses: Vec::new(),
            birthdays: Vec::new(),
            date: "20.03.2025".to_string(),
            time: "09:00".to_string(),
            day: "Perşembe".to_string(),
            messages: Vec::new(),
            quotes: vec![Quote::Attributed {
                text: "Hayatta en hakiki mürşit ilimdir.".to_string(),
                author: Some("Atatürk".to_string()),
            }],
            countdown: Countdown {
                label: "Karne".to_string(),
                target_date: Some("2025-06-20".to_string()),
            },
            slideshow: Slideshow::default(),
        }
    }

    #[test]
    fn lesson_view_lists_classes() {
        let text = render_text(&snapshot(), Some(92));
        assert!(text.starts_with("Perşembe 20.03.2025 09:00\n"));
        assert!(text.contains("Status: 2. Ders (lesson 2)"));
        assert!(text.contains("  - 9-A: Fizik"));
        assert!(text.contains("Quote: Hayatta en hakiki mürşit ilimdir. (Atatürk)"));
        assert!(text.contains("Karne: 92 days left"));
        assert!(!text.contains("Birthdays"), "empty sections are omitted");
    }

    #[test]
    fn break_view_lists_next_lesson() {
        let mut snap = snapshot();
        snap.is_lesson = false;
        snap.lesson_number = 0;
        snap.status = "Teneffüs".to_string();
        snap.class_statuses.clear();
        snap.next_class_statuses = vec!["9-A: Kimya".to_string()];

        let text = render_text(&snap, Some(0));
        assert!(text.contains("Status: Teneffüs\n"));
        assert!(text.contains("Next lesson:\n  - 9-A: Kimya"));
        assert!(text.contains("Karne: expired"));
    }
}
