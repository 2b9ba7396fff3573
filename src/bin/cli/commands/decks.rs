use anyhow::Result;
use chrono::Utc;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let now = Utc::now();
    let active_id = app.storage.active_deck_id();

    match format {
        OutputFormat::Json => {
            let mut output = Vec::new();
            for deck in app.storage.list_decks() {
                let stats = app.storage.stats(deck.id, now)?;
                output.push(serde_json::json!({
                    "id": deck.id.to_string(),
                    "name": deck.name,
                    "description": deck.description,
                    "isProtected": deck.is_protected,
                    "isActive": deck.id == active_id,
                    "createdAt": deck.created_at,
                    "stats": stats,
                }));
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for deck in app.storage.list_decks() {
                let stats = app.storage.stats(deck.id, now)?;
                let current = if deck.id == active_id { "* " } else { "  " };
                let protected = if deck.is_protected { " [built-in]" } else { "" };
                println!(
                    "{}{}{} ({} words, {} due)",
                    current,
                    paint(&deck.name, Color::BOLD, use_color),
                    protected,
                    stats.total,
                    stats.due
                );
                if !deck.description.is_empty() {
                    println!("    {}", paint(&deck.description, Color::DIM, use_color));
                }
            }
        }
    }

    Ok(())
}
