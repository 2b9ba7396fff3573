use anyhow::{Context, Result};
use chrono::Local;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let today = Local::now().date_naive();
    let streak = app.streak.load(today).context("Failed to load streak")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "streak": streak,
                "studiedToday": streak.has_studied_today(today),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let days = |n: u32| if n == 1 { "1 day".to_string() } else { format!("{} days", n) };
            println!(
                "Current streak: {}",
                paint(&days(streak.current_streak), Color::BOLD, use_color)
            );
            println!("Longest streak: {}", days(streak.longest_streak));
            println!("Days studied:   {}", streak.total_days_studied);
            if !streak.has_studied_today(today) {
                println!("{}", paint("Not studied yet today.", Color::DIM, use_color));
            }
        }
    }
    Ok(())
}
