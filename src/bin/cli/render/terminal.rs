use chrono::{DateTime, Utc};

use lexicard_lib::flashcards::algorithm::{format_interval, preview_intervals, time_until_review};
use lexicard_lib::flashcards::{CardWithState, Quality, QueueStats, VocabularyItem};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const ITALIC: &str = "\x1b[3m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap text in a color when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Front of a card: the term and its part of speech
pub fn render_front(word: &VocabularyItem, position: usize, total: usize, use_color: bool) -> String {
    format!(
        "{} {} {}",
        paint(&format!("[{}/{}]", position, total), Color::GRAY, use_color),
        paint(&word.term, Color::BOLD, use_color),
        paint(&format!("({})", word.part_of_speech), Color::DIM, use_color),
    )
}

/// Back of a card: definition, example and synonyms
pub fn render_back(word: &VocabularyItem, use_color: bool) -> String {
    let mut lines = vec![format!("  {}", word.definition)];
    lines.push(format!(
        "  {}",
        paint(&format!("\"{}\"", word.example), Color::ITALIC, use_color)
    ));
    if !word.synonyms.is_empty() {
        lines.push(format!(
            "  {} {}",
            paint("Synonyms:", Color::DIM, use_color),
            word.synonyms.join(", ")
        ));
    }
    lines.join("\n")
}

/// One line per rating with the interval it would schedule
pub fn render_rating_choices(card: &CardWithState, use_color: bool) -> String {
    let intervals = preview_intervals(&card.state);
    Quality::ALL
        .iter()
        .zip(intervals)
        .map(|(quality, days)| {
            let color = if quality.is_pass() { Color::GREEN } else { Color::RED };
            format!(
                "  {} {:<10} {}",
                paint(&quality.value().to_string(), color, use_color),
                quality.label(),
                paint(&format_interval(days), Color::GRAY, use_color),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Compact schedule line for a card
pub fn render_schedule(card: &CardWithState, now: DateTime<Utc>, use_color: bool) -> String {
    let state = &card.state;
    let when = if state.is_due(now) {
        paint("due", Color::YELLOW, use_color)
    } else {
        time_until_review(state, now)
    };
    format!(
        "{:<22} {:<9} EF {:.2}  {}",
        card.word.term,
        format_interval(state.interval),
        state.easiness_factor,
        when
    )
}

/// Queue counts as aligned rows
pub fn render_stats(stats: &QueueStats, use_color: bool) -> String {
    [
        ("Total", stats.total, Color::BOLD),
        ("Due", stats.due, Color::YELLOW),
        ("New", stats.new, Color::BLUE),
        ("Learning", stats.learning, Color::CYAN),
        ("Mastered", stats.mastered, Color::GREEN),
    ]
    .iter()
    .map(|(label, count, color)| {
        format!("  {:<9} {}", label, paint(&count.to_string(), color, use_color))
    })
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexicard_lib::flashcards::{ReviewState, WordFields};

    #[test]
    fn test_paint_without_color() {
        assert_eq!(paint("word", Color::BOLD, false), "word");
        assert_eq!(paint("word", Color::BOLD, true), "\x1b[1mword\x1b[0m");
    }

    #[test]
    fn test_rating_choices_for_new_card() {
        let word = VocabularyItem::new(WordFields::new("Laconic", "Using few words"));
        let state = ReviewState::new(word.id);
        let rendered = render_rating_choices(&CardWithState { word, state }, false);

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("Blackout") && lines[0].ends_with("1 day"));
        assert!(lines[5].contains("Perfect") && lines[5].ends_with("1 day"));
    }
}
