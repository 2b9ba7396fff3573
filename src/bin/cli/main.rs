mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lexicard_lib::StudyQueue;

#[derive(Parser)]
#[command(name = "lexicard", about = "Spaced repetition vocabulary trainer", version)]
struct Cli {
    /// Use a specific data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List all decks with their queue counts
    Decks,

    /// Create, delete, select or inspect a deck
    #[command(subcommand)]
    Deck(DeckCommand),

    /// Add or remove words
    #[command(subcommand)]
    Word(WordCommand),

    /// Create a deck from a CSV file
    Import {
        /// CSV file (use "-" to read from stdin)
        file: String,
        /// Deck name (defaults to the file name)
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Write a deck's words as CSV
    Export {
        /// Deck name (case-insensitive prefix match, default: active deck)
        deck: Option<String>,
        /// Output file (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Show queue counts for a deck
    Stats {
        /// Deck name (default: active deck)
        deck: Option<String>,
    },

    /// List the words in a study queue
    Queue {
        /// due, new, learning, mastered or all (default from config)
        queue: Option<StudyQueue>,
        /// Deck name (default: active deck)
        #[arg(long)]
        deck: Option<String>,
    },

    /// Study flashcards interactively
    Study {
        /// Deck name (default: active deck)
        #[arg(long)]
        deck: Option<String>,
        /// Queue to study (default from config)
        #[arg(long)]
        queue: Option<StudyQueue>,
        /// Shuffle the words before starting
        #[arg(long)]
        shuffle: bool,
    },

    /// Multiple-choice quiz over a queue
    Quiz {
        /// Deck name (default: active deck)
        #[arg(long)]
        deck: Option<String>,
        /// Queue to quiz (default from config)
        #[arg(long)]
        queue: Option<StudyQueue>,
        /// Number of choices per word
        #[arg(long)]
        options: Option<usize>,
    },

    /// Forget all review progress of a deck
    Reset {
        /// Deck name (default: active deck)
        deck: Option<String>,
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Show the daily study streak
    Streak,
}

#[derive(Subcommand)]
enum DeckCommand {
    /// Create an empty deck
    Create {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete a deck and its progress
    Delete {
        /// Deck name (case-insensitive prefix match)
        deck: String,
    },

    /// Make a deck the active one
    Use {
        /// Deck name (case-insensitive prefix match)
        deck: String,
    },

    /// List a deck's words with their schedule
    Show {
        /// Deck name (default: active deck)
        deck: Option<String>,
    },
}

#[derive(Subcommand)]
enum WordCommand {
    /// Add a word to a deck
    Add {
        term: String,
        definition: String,
        /// Deck name (default: active deck)
        #[arg(long)]
        deck: Option<String>,
        /// Part of speech (default: noun)
        #[arg(long)]
        pos: Option<String>,
        #[arg(long)]
        example: Option<String>,
        /// Comma-separated synonyms
        #[arg(long)]
        synonyms: Option<String>,
    },

    /// Remove a word from a deck
    Remove {
        /// Word (case-insensitive)
        term: String,
        /// Deck name (default: active deck)
        #[arg(long)]
        deck: Option<String>,
    },
}

/// Read a file, or stdin for "-"
fn read_input(file: &str) -> anyhow::Result<String> {
    use anyhow::Context;

    if file == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let mut app = app::App::new(cli.data_dir)?;

    match cli.command {
        Command::Decks => {
            commands::decks::run(&app, &cli.format, use_color)?;
        }
        Command::Deck(subcmd) => match subcmd {
            DeckCommand::Create { name, description } => {
                commands::deck::run_create(&mut app, name, description, &cli.format)?;
            }
            DeckCommand::Delete { deck } => {
                commands::deck::run_delete(&mut app, &deck, &cli.format)?;
            }
            DeckCommand::Use { deck } => {
                commands::deck::run_use(&mut app, &deck, &cli.format)?;
            }
            DeckCommand::Show { deck } => {
                commands::deck::run_show(&app, deck.as_deref(), &cli.format, use_color)?;
            }
        },
        Command::Word(subcmd) => match subcmd {
            WordCommand::Add { term, definition, deck, pos, example, synonyms } => {
                commands::word::run_add(
                    &mut app,
                    deck.as_deref(),
                    term,
                    definition,
                    pos,
                    example,
                    synonyms.as_deref(),
                    &cli.format,
                )?;
            }
            WordCommand::Remove { term, deck } => {
                commands::word::run_remove(&mut app, deck.as_deref(), &term, &cli.format)?;
            }
        },
        Command::Import { file, name, description } => {
            let text = read_input(&file)?;
            let name = name.unwrap_or_else(|| commands::import::deck_name_for(&file));
            commands::import::run(&mut app, name, description, &text, &cli.format)?;
        }
        Command::Export { deck, output } => {
            commands::export::run(&app, deck.as_deref(), output.as_deref())?;
        }
        Command::Stats { deck } => {
            commands::stats::run(&app, deck.as_deref(), &cli.format, use_color)?;
        }
        Command::Queue { queue, deck } => {
            commands::queue::run(&app, deck.as_deref(), queue, &cli.format, use_color)?;
        }
        Command::Study { deck, queue, shuffle } => {
            commands::study::run(&mut app, deck.as_deref(), queue, shuffle, &cli.format, use_color)?;
        }
        Command::Quiz { deck, queue, options } => {
            commands::quiz::run(&mut app, deck.as_deref(), queue, options, &cli.format, use_color)?;
        }
        Command::Reset { deck, yes } => {
            commands::reset::run(&mut app, deck.as_deref(), yes, &cli.format)?;
        }
        Command::Streak => {
            commands::streak::run(&app, &cli.format, use_color)?;
        }
    }

    Ok(())
}
