use std::io;

use anyhow::Result;

use lexicard_lib::flashcards::StudyQueue;
use lexicard_lib::session::{generate_options, SessionPhase, StudySession};

use crate::app::App;
use crate::commands::study::{print_summary, prompt};
use crate::render::terminal::{self, paint, Color};
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    deck_name: Option<&str>,
    queue: Option<StudyQueue>,
    option_count: Option<usize>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let deck = app.resolve_deck(deck_name)?;
    let queue = queue.unwrap_or(app.config.study.default_queue);
    let option_count = option_count.unwrap_or(app.config.quiz.option_count).max(2);
    let policy = app.config.answer_policy();
    let shuffle = app.config.study.shuffle;

    let summary = {
        let mut session = StudySession::new(&mut app.storage, deck.id)?.with_answer_policy(policy);
        session.start(queue)?;
        if shuffle {
            session.shuffle();
        }

        if session.is_empty() {
            println!("Nothing to quiz in the '{}' queue of '{}'.", queue, deck.name);
            return Ok(());
        }

        let mut rng = rand::thread_rng();
        let stdin = io::stdin();
        let mut input = stdin.lock();

        while session.phase() == SessionPhase::Presenting {
            let Some(card) = session.current()? else { break };
            println!();
            println!(
                "{}",
                terminal::render_front(&card.word, session.index() + 1, session.len(), use_color)
            );

            let options = generate_options(&card.word, &deck.words, option_count, &mut rng);
            for (i, option) in options.iter().enumerate() {
                println!("  {}) {}", i + 1, option.definition);
            }

            let message = format!("Answer 1-{} (q quit): ", options.len());
            let Some(command) = prompt(&mut input, &message)? else { break };
            if command == "q" {
                break;
            }

            let Some(choice) = command
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=options.len()).contains(n))
            else {
                println!("Pick a number from 1 to {}.", options.len());
                continue;
            };

            let correct = options[choice - 1].is_correct;
            if correct {
                println!("{}", paint("Correct!", Color::GREEN, use_color));
            } else {
                println!(
                    "{} {}",
                    paint("Wrong:", Color::RED, use_color),
                    card.word.definition
                );
            }
            session.answer(correct)?;
        }

        session.summary().clone()
    };

    if summary.reviewed > 0 {
        app.record_study_day()?;
    }
    print_summary(&deck, &summary, format, use_color)
}
