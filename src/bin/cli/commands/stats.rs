use anyhow::Result;
use chrono::Utc;

use crate::app::App;
use crate::render::terminal::{self, paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, deck_name: Option<&str>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let deck = app.resolve_deck(deck_name)?;
    let stats = app.storage.stats(deck.id, Utc::now())?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "deck": deck.name,
                "stats": stats,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", paint(&deck.name, Color::BOLD, use_color));
            println!("{}", terminal::render_stats(&stats, use_color));
        }
    }
    Ok(())
}
