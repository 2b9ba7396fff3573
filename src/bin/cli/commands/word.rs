use anyhow::{Context, Result};

use lexicard_lib::flashcards::WordFields;

use crate::app::App;
use crate::OutputFormat;

#[allow(clippy::too_many_arguments)]
pub fn run_add(
    app: &mut App,
    deck_name: Option<&str>,
    term: String,
    definition: String,
    part_of_speech: Option<String>,
    example: Option<String>,
    synonyms: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    let deck = app.resolve_deck(deck_name)?;

    let mut fields = WordFields::new(term, definition);
    fields.part_of_speech = part_of_speech;
    fields.example = example;
    fields.synonyms = synonyms
        .map(|s| {
            s.split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let word = app
        .storage
        .add_word(deck.id, fields)
        .context("Failed to add word")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&word)?),
        OutputFormat::Plain => println!("Added '{}' to '{}'", word.term, deck.name),
    }
    Ok(())
}

pub fn run_remove(app: &mut App, deck_name: Option<&str>, term: &str, format: &OutputFormat) -> Result<()> {
    let deck = app.resolve_deck(deck_name)?;
    let word = app.find_word(&deck, term)?.clone();

    app.storage
        .remove_word(deck.id, word.id)
        .context("Failed to remove word")?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "deleted": word.id.to_string(),
                "term": word.term,
            }))?
        ),
        OutputFormat::Plain => println!("Removed '{}' from '{}'", word.term, deck.name),
    }
    Ok(())
}
