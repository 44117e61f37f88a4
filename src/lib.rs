/**
 * A party quiz game: a present with a hidden alarm clock goes around the table, players
 * answer questions while they hold it, and whoever has it when the alarm goes off wins.
 *
 * The interesting part is question selection. No question repeats until the whole set
 * has been shown (even across restarts), and each player gets a mix of easy, medium and
 * hard questions suited to their age.
 *
 * Version: November 2025
 */
#[macro_use]
pub mod iohelper;
pub mod alarm;
pub mod common;
pub mod players;
pub mod pool;
pub mod question;
pub mod sequencer;
pub mod session;
pub mod storage;
pub mod tracker;
pub mod ui;
pub mod weighting;

pub use common::{QuizError, Result};
pub use question::{Corpus, Difficulty, Question, QuestionId};
pub use session::Session;
