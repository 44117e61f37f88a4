/**
 * Play the Sinterklaas present game from the command line.
 *
 * Version: November 2025
 */
use std::fs;
use std::path::PathBuf;
use std::time;

use colored::*;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use structopt::StructOpt;

use sintspel::common::{Command, Options, PlayOptions, QuizError, Result};
use sintspel::players::Roster;
use sintspel::question::Corpus;
use sintspel::storage::SqliteStorage;
use sintspel::tracker::ShownTracker;
use sintspel::ui::{Action, CmdUI};
use sintspel::weighting::get_age_weights;
use sintspel::Session;


fn main() {
    pretty_env_logger::init();
    let options = Options::from_args();

    if options.no_color {
        colored::control::set_override(false);
    }

    let result = match options.cmd {
        Command::Play(ref play_options) => main_play(&options, play_options),
        Command::Weights(ref weights_options) => {
            let weights = get_age_weights(Some(weights_options.age));
            CmdUI::new().weights(weights_options.age, &weights)
        },
        Command::Status => main_status(&options),
        Command::Reset => main_reset(&options),
    };

    if let Err(e) = result {
        if let QuizError::ReadlineInterrupted = e {
            return;
        }
        eprintln!("{}: {}", "Error".red(), e);
        ::std::process::exit(2);
    }
}


/// The main function for the `play` subcommand.
fn main_play(options: &Options, play_options: &PlayOptions) -> Result<()> {
    let mut roster = Roster::new();
    for player in play_options.players.iter() {
        roster.add_from_str(player)?;
    }

    let mut corpus = load_corpus(options)?;
    if play_options.types.len() > 0 {
        corpus = corpus.filter_by_type(&play_options.types)?;
    }

    let storage = open_storage(options)?;
    let mut session = Session::new(corpus, Box::new(storage), roster, StdRng::from_entropy())?;
    let alarm_minutes = if play_options.no_alarm {
        None
    } else {
        session.start_alarm(play_options.alarm_minutes)?;
        Some(play_options.alarm_minutes)
    };

    let mut ui = CmdUI::new();
    ui.rules(session.roster().players(), alarm_minutes)?;
    let mut last_tick = time::Instant::now();
    let mut question = None;
    loop {
        if question.is_none() {
            question = session.current_question();
            match &question {
                Some(question) => ui.question(question, session.current_player(), session.streak())?,
                None => {
                    return Err(QuizError::EmptyCorpus);
                },
            }
        }

        let action = ui.prompt()?;

        // The alarm is checked before acting on the input, so that whoever held the
        // present when it went off is the winner.
        let elapsed = last_tick.elapsed().as_secs();
        if elapsed > 0 {
            last_tick += time::Duration::from_secs(elapsed);
            if session.tick(elapsed) {
                ui.alarm()?;
                break;
            }
        }

        match action {
            Action::Reveal => {
                if let Some(question) = &question {
                    ui.answer(question)?;
                }
            },
            Action::Correct | Action::Wrong => {
                let outcome = if action == Action::Correct {
                    session.correct()?
                } else {
                    session.wrong()?
                };
                ui.outcome(outcome, session.current_player())?;
                question = None;
            },
            Action::Next | Action::Previous => {
                session.skip(if action == Action::Next { 1 } else { -1 })?;
                question = None;
            },
            Action::ToggleAlarm => {
                match session.alarm().map(|a| a.is_paused()) {
                    Some(true) => {
                        session.resume_alarm();
                        ui.status("Alarm resumed.")?;
                    },
                    Some(false) => {
                        session.pause_alarm();
                        ui.status("Alarm paused.")?;
                    },
                    None => ui.status("There is no alarm in this game.")?,
                }
            },
            Action::AlarmTime => {
                let alarm = session.alarm();
                ui.time_left(alarm.and_then(|a| a.time_left()), alarm.map(|a| a.is_paused()).unwrap_or(false))?;
            },
            Action::Help => ui.help()?,
            Action::Quit => break,
            Action::Unknown => ui.status("Unknown command, type h for help.")?,
        }
    }

    ui.summary(&session.summary())
}


/// The main function for the `status` subcommand.
fn main_status(options: &Options) -> Result<()> {
    let corpus = load_corpus(options)?;
    let tracker = ShownTracker::new(Box::new(open_storage(options)?));
    let shown = tracker.load().restricted_to(&corpus);
    CmdUI::new().shown(shown.len(), corpus.len())
}


/// The main function for the `reset` subcommand.
fn main_reset(options: &Options) -> Result<()> {
    let mut tracker = ShownTracker::new(Box::new(open_storage(options)?));
    tracker.reset();
    CmdUI::new().status("All questions are available again.")
}


fn load_corpus(options: &Options) -> Result<Corpus> {
    match &options.questions {
        Some(path) => Corpus::from_path(path),
        None => Corpus::builtin(),
    }
}


fn open_storage(options: &Options) -> Result<SqliteStorage> {
    let dir = get_data_dir_path(options);
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(QuizError::Io)?;
    }

    let path = dir.join("storage.sqlite3");
    debug!("using storage at {}", path.to_string_lossy());
    SqliteStorage::open(&path)
}


/// Return the directory where the game keeps its state.
fn get_data_dir_path(options: &Options) -> PathBuf {
    if let Some(dir) = &options.directory {
        return dir.clone();
    }

    let mut dirpath = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    dirpath.push("sintspel");
    dirpath
}
