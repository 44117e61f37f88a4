/**
 * Definitions of data structures used by several modules, such as `QuizError` and the
 * various structs that hold command-line arguments.
 *
 * Version: November 2025
 */
use std::error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use structopt::StructOpt;


pub type Result<T> = ::std::result::Result<T, QuizError>;


#[derive(Debug)]
pub enum QuizError {
    /// For JSON errors.
    Json(serde_json::Error),
    Sql(rusqlite::Error),
    Io(io::Error),
    ReadlineInterrupted,
    EmptyCorpus,
    DuplicateQuestionId(u64),
    InvalidPlayer(String),
    NotEnoughPlayers { required: usize, actual: usize },
    InvalidAlarmTime(u32),
    /// The alarm has gone off and the game no longer accepts moves.
    GameLocked,
}


impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            QuizError::Json(ref err) => {
                write!(f, "could not parse JSON ({})", err)
            },
            QuizError::Sql(ref err) => {
                write!(f, "SQL error ({})", err)
            },
            QuizError::Io(ref err) => {
                write!(f, "IO error ({})", err)
            },
            QuizError::ReadlineInterrupted => {
                Ok(())
            },
            QuizError::EmptyCorpus => {
                write!(f, "no questions found")
            },
            QuizError::DuplicateQuestionId(id) => {
                write!(f, "question id {} is used more than once", id)
            },
            QuizError::InvalidPlayer(ref reason) => {
                write!(f, "invalid player ({})", reason)
            },
            QuizError::NotEnoughPlayers { required, actual } => {
                write!(f, "need at least {} players, got {}", required, actual)
            },
            QuizError::InvalidAlarmTime(minutes) => {
                write!(f, "alarm time must be between 1 and 60 minutes, got {}", minutes)
            },
            QuizError::GameLocked => {
                write!(f, "the alarm went off, the game is over")
            },
        }
    }
}


impl error::Error for QuizError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            QuizError::Json(ref err) => Some(err),
            QuizError::Sql(ref err) => Some(err),
            QuizError::Io(ref err) => Some(err),
            _ => None,
        }
    }
}


/// Holds the command-line configuration for the application.
#[derive(StructOpt)]
#[structopt(name = "sintspel", about = "Pass the present around and answer questions.")]
pub struct Options {
    /// Store the list of shown questions in a particular directory.
    #[structopt(short = "d", long = "directory")]
    pub directory: Option<PathBuf>,
    /// Load questions from a JSON file instead of the built-in set.
    #[structopt(long = "questions")]
    pub questions: Option<PathBuf>,
    /// Do not emit colorized output.
    #[structopt(long = "no-color")]
    pub no_color: bool,
    #[structopt(subcommand)]
    pub cmd: Command,
}

#[derive(StructOpt)]
pub enum Command {
    /// Play a game.
    #[structopt(name = "play")]
    Play(PlayOptions),
    /// Show the difficulty mix for a player's age.
    #[structopt(name = "weights")]
    Weights(WeightsOptions),
    /// Report how many questions have been shown this cycle.
    #[structopt(name = "status")]
    Status,
    /// Forget which questions have been shown.
    #[structopt(name = "reset")]
    Reset,
}

#[derive(StructOpt)]
pub struct PlayOptions {
    /// A player as NAME:AGE. Repeat for every player, in turn order.
    #[structopt(short = "p", long = "player")]
    pub players: Vec<String>,
    /// The alarm goes off at a random moment in the last two minutes before this.
    #[structopt(long = "alarm", default_value = "10")]
    pub alarm_minutes: u32,
    /// Play without the alarm.
    #[structopt(long = "no-alarm")]
    pub no_alarm: bool,
    /// Only ask questions of the given type.
    #[structopt(long = "type")]
    pub types: Vec<String>,
}

#[derive(StructOpt)]
pub struct WeightsOptions {
    /// Age of the player.
    pub age: u32,
}
