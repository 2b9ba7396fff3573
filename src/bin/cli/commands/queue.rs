use anyhow::Result;
use chrono::Utc;

use lexicard_lib::flashcards::StudyQueue;

use crate::app::App;
use crate::render::terminal::{self, paint, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    deck_name: Option<&str>,
    queue: Option<StudyQueue>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let deck = app.resolve_deck(deck_name)?;
    let queue = queue.unwrap_or(app.config.study.default_queue);
    let now = Utc::now();
    let cards = app.storage.queue(deck.id, queue, now)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "deck": deck.name,
                "queue": queue,
                "cards": cards,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let title = format!("{} / {}", deck.name, queue);
            println!("{}", paint(&title, Color::BOLD, use_color));

            if cards.is_empty() {
                println!("Nothing in the '{}' queue.", queue);
                return Ok(());
            }

            for card in &cards {
                println!("{}", terminal::render_schedule(card, now, use_color));
            }
            println!("\n{} words", cards.len());
        }
    }
    Ok(())
}
