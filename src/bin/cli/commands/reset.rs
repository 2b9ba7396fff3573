use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, deck_name: Option<&str>, yes: bool, format: &OutputFormat) -> Result<()> {
    let deck = app.resolve_deck(deck_name)?;

    if !yes {
        print!("Forget all progress on '{}'? [y/N] ", deck.name);
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    app.storage
        .reset_progress(deck.id)
        .context("Failed to reset progress")?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "reset": deck.id.to_string(),
            }))?
        ),
        OutputFormat::Plain => println!("Progress on '{}' reset.", deck.name),
    }
    Ok(())
}
