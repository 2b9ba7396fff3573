use std::path::Path;

use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

/// Deck name derived from the imported file's name
pub fn deck_name_for(file: &str) -> String {
    if file == "-" {
        return "Imported Deck".to_string();
    }
    Path::new(file)
        .file_stem()
        .map(|s| s.to_string_lossy().replace(['_', '-'], " "))
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "Imported Deck".to_string())
}

pub fn run(app: &mut App, name: String, description: String, text: &str, format: &OutputFormat) -> Result<()> {
    let (deck, report) = app
        .storage
        .import_deck(name, description, text)
        .context("Import failed")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "deck": {
                    "id": deck.id.to_string(),
                    "name": deck.name,
                },
                "imported": report.items.len(),
                "rejected": report.rejected,
                "header": report.header,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Imported {} words into '{}'", report.items.len(), deck.name);
            if let Some(header) = report.header.as_ref().filter(|h| !h.is_export_header()) {
                eprintln!(
                    "Line {} was read as a header and skipped: {}",
                    header.line,
                    header.fields.join(", ")
                );
            }
            if !report.rejected.is_empty() {
                eprintln!("{} rows skipped:", report.rejected.len());
                for row in &report.rejected {
                    eprintln!("  {}", row);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_name_for() {
        assert_eq!(deck_name_for("words/gre_week-2.csv"), "gre week 2");
        assert_eq!(deck_name_for("-"), "Imported Deck");
    }
}
