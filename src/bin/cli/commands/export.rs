use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::app::App;

pub fn run(app: &App, deck_name: Option<&str>, output: Option<&Path>) -> Result<()> {
    let deck = app.resolve_deck(deck_name)?;
    let text = app
        .storage
        .export_deck(deck.id)
        .with_context(|| format!("Failed to export '{}'", deck.name))?;

    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", text))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Exported {} words to {}", deck.words.len(), path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}
