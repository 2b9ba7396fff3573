use std::io::{self, BufRead, Write};

use anyhow::Result;

use lexicard_lib::flashcards::algorithm::format_interval;
use lexicard_lib::flashcards::{Deck, Quality, StudyQueue};
use lexicard_lib::session::{SessionPhase, SessionSummary, StudySession};

use crate::app::App;
use crate::render::terminal::{self, paint, Color};
use crate::OutputFormat;

/// Print a prompt and read one trimmed, lowercased line; `None` on EOF
pub fn prompt(input: &mut impl BufRead, message: &str) -> Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

pub fn run(
    app: &mut App,
    deck_name: Option<&str>,
    queue: Option<StudyQueue>,
    shuffle: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let deck = app.resolve_deck(deck_name)?;
    let queue = queue.unwrap_or(app.config.study.default_queue);
    let shuffle = shuffle || app.config.study.shuffle;

    let summary = {
        let mut session = StudySession::new(&mut app.storage, deck.id)?;
        session.start(queue)?;
        if shuffle {
            session.shuffle();
        }

        if session.is_empty() {
            println!("Nothing to study in the '{}' queue of '{}'.", queue, deck.name);
            return Ok(());
        }

        let stdin = io::stdin();
        let mut input = stdin.lock();
        study_loop(&mut session, &mut input, use_color)?;
        session.summary().clone()
    };

    if summary.reviewed > 0 {
        app.record_study_day()?;
    }
    print_summary(&deck, &summary, format, use_color)
}

fn study_loop(session: &mut StudySession<'_>, input: &mut impl BufRead, use_color: bool) -> Result<()> {
    loop {
        match session.phase() {
            SessionPhase::Idle | SessionPhase::Exhausted => break,
            SessionPhase::Presenting => {
                let Some(card) = session.current()? else { break };
                println!();
                println!(
                    "{}",
                    terminal::render_front(&card.word, session.index() + 1, session.len(), use_color)
                );

                let Some(command) = prompt(input, "[Enter] show answer, n next, p previous, s shuffle, q quit: ")? else {
                    break;
                };
                match command.as_str() {
                    "" => session.reveal()?,
                    "n" => {
                        if !session.next() {
                            println!("Already at the last word.");
                        }
                    }
                    "p" => {
                        if !session.previous() {
                            println!("Already at the first word.");
                        }
                    }
                    "s" => session.shuffle(),
                    "q" => break,
                    other => println!("Unknown command '{}'", other),
                }
            }
            SessionPhase::Flipped => {
                let Some(card) = session.current()? else { break };
                println!("{}", terminal::render_back(&card.word, use_color));
                println!("{}", terminal::render_rating_choices(&card, use_color));

                let Some(command) = prompt(input, "Rate 0-5 (q quit): ")? else { break };
                if command == "q" {
                    break;
                }

                match command.parse::<i64>().ok().and_then(|v| Quality::try_from(v).ok()) {
                    Some(quality) => {
                        let state = session.rate(quality)?;
                        println!(
                            "{} next review in {}",
                            paint(quality.label(), Color::DIM, use_color),
                            format_interval(state.interval)
                        );
                    }
                    None => println!("Enter a rating from 0 to 5."),
                }
            }
        }
    }

    if session.phase() == SessionPhase::Exhausted {
        println!("\nQueue finished.");
    }
    Ok(())
}

/// Print the totals of a finished session
pub fn print_summary(deck: &Deck, summary: &SessionSummary, format: &OutputFormat, use_color: bool) -> Result<()> {
    let missed: Vec<&str> = summary
        .missed
        .iter()
        .filter_map(|id| deck.word(*id))
        .map(|w| w.term.as_str())
        .collect();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "deck": deck.name,
                "reviewed": summary.reviewed,
                "correct": summary.correct,
                "missed": missed,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "\nReviewed {} words, {} correct.",
                paint(&summary.reviewed.to_string(), Color::BOLD, use_color),
                summary.correct
            );
            if !missed.is_empty() {
                println!("Missed: {}", paint(&missed.join(", "), Color::RED, use_color));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_reads_lines_until_eof() {
        let mut input = io::Cursor::new("  N \n");
        assert_eq!(prompt(&mut input, "").unwrap().as_deref(), Some("n"));
        assert_eq!(prompt(&mut input, "").unwrap(), None);
    }
}
