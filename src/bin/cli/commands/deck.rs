use anyhow::{Context, Result};
use chrono::Utc;

use crate::app::App;
use crate::render::terminal::{self, paint, Color};
use crate::OutputFormat;

pub fn run_create(app: &mut App, name: String, description: String, format: &OutputFormat) -> Result<()> {
    let deck = app
        .storage
        .create_deck(name, description)
        .context("Failed to create deck")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&deck)?),
        OutputFormat::Plain => println!("Created deck '{}'", deck.name),
    }
    Ok(())
}

pub fn run_delete(app: &mut App, deck_name: &str, format: &OutputFormat) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    app.storage
        .delete_deck(deck.id)
        .with_context(|| format!("Failed to delete deck '{}'", deck.name))?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "deleted": deck.id.to_string(),
                "activeDeck": app.storage.active_deck_id().to_string(),
            }))?
        ),
        OutputFormat::Plain => {
            println!("Deleted deck '{}'", deck.name);
            println!("Active deck: {}", app.storage.active_deck().name);
        }
    }
    Ok(())
}

pub fn run_use(app: &mut App, deck_name: &str, format: &OutputFormat) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    app.storage
        .set_active(deck.id)
        .context("Failed to set active deck")?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "activeDeck": deck.id.to_string(),
                "name": deck.name,
            }))?
        ),
        OutputFormat::Plain => println!("Now studying '{}'", deck.name),
    }
    Ok(())
}

pub fn run_show(app: &App, deck_name: Option<&str>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let deck = app.resolve_deck(deck_name)?;
    let cards = app.storage.cards_with_state(deck.id)?;
    let now = Utc::now();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": deck.id.to_string(),
                "name": deck.name,
                "description": deck.description,
                "isProtected": deck.is_protected,
                "cards": cards,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", paint(&deck.name, Color::BOLD, use_color));
            if !deck.description.is_empty() {
                println!("{}", paint(&deck.description, Color::DIM, use_color));
            }
            println!();

            if cards.is_empty() {
                println!("No words in this deck.");
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
