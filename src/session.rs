/**
 * A game session: the questions, who has the present, which question is on the table,
 * and the alarm. Everything the question selection needs is owned here and passed
 * explicitly to the pool, weighting and sequencing functions.
 *
 * Version: November 2025
 */
use log::{debug, info};
use rand::rngs::StdRng;

use super::alarm::Alarm;
use super::common::{QuizError, Result};
use super::players::{Player, Roster, MIN_PLAYERS};
use super::pool::{generate, is_exhausted};
use super::question::{Corpus, Question};
use super::sequencer::select_current;
use super::storage::Storage;
use super::tracker::{ShownSet, ShownTracker};
use super::weighting::build_weighted_pool;


/// Correct answers in a row after which the present moves on anyway.
pub const MAX_STREAK: u32 = 3;


/// What happened to the present after an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The same player gets the next question.
    NextQuestion,
    /// Three in a row: the present goes to the next player.
    ThreeInARow,
    /// Wrong answer: the present goes to the next player.
    Wrong,
}


/// The end result of a game.
#[derive(Debug)]
pub struct GameSummary {
    /// Whoever held the present when the alarm went off.
    pub winner: Option<Player>,
    /// Everyone tied for the highest score.
    pub smartest: Vec<Player>,
    pub questions_shown: usize,
    pub time_finished: chrono::DateTime<chrono::Local>,
}


pub struct Session {
    corpus: Corpus,
    tracker: ShownTracker,
    shown: ShownSet,
    /// Candidate questions, not shown at the time the pool was generated.
    pool: Vec<Question>,
    /// The candidate pool re-sampled for the current player's age.
    weighted: Vec<Question>,
    roster: Roster,
    current_player: usize,
    page: i64,
    streak: u32,
    alarm: Option<Alarm>,
    rng: StdRng,
}


impl Session {
    /// Start a session. `roster` is either empty, for a game without named players, or
    /// has at least two players.
    pub fn new(
        corpus: Corpus,
        storage: Box<dyn Storage>,
        roster: Roster,
        rng: StdRng,
    ) -> Result<Self> {
        if !roster.is_empty() && !roster.can_start() {
            return Err(QuizError::NotEnoughPlayers { required: MIN_PLAYERS, actual: roster.len() });
        }

        // The whole loaded list is kept and saved back, including ids of questions that
        // are not in `corpus` because of a type filter.
        let tracker = ShownTracker::new(storage);
        let shown = tracker.load();
        let in_corpus = shown.restricted_to(&corpus).len();
        if in_corpus < shown.len() {
            debug!("{} shown ids are not in this set of questions", shown.len() - in_corpus);
        }

        let mut session = Session {
            corpus,
            tracker,
            shown,
            pool: Vec::new(),
            weighted: Vec::new(),
            roster,
            current_player: 0,
            page: 0,
            streak: 0,
            alarm: None,
            rng,
        };
        session.regenerate();
        Ok(session)
    }

    /// Return the question on the table and record it as shown. Returns `None` only if
    /// there is nothing to ask.
    pub fn current_question(&mut self) -> Option<Question> {
        let question = select_current(&self.weighted, self.page)?.clone();
        self.shown = self.tracker.mark_shown(&self.shown, question.id);
        if is_exhausted(&self.weighted, &self.shown) {
            debug!("every question in the pool has been shown");
            self.regenerate();
        }
        Some(question)
    }

    /// Move to the next (`direction` > 0) or previous (`direction` < 0) question without
    /// scoring, e.g. because the question does not suit the player.
    pub fn skip(&mut self, direction: i64) -> Result<()> {
        self.check_unlocked()?;
        self.page += direction;
        Ok(())
    }

    pub fn correct(&mut self) -> Result<TurnOutcome> {
        self.check_unlocked()?;
        if !self.roster.is_empty() {
            self.roster.increment_score(self.current_player);
        }

        self.streak += 1;
        if self.streak >= MAX_STREAK {
            self.pass_present();
            Ok(TurnOutcome::ThreeInARow)
        } else {
            self.page += 1;
            Ok(TurnOutcome::NextQuestion)
        }
    }

    pub fn wrong(&mut self) -> Result<TurnOutcome> {
        self.check_unlocked()?;
        self.pass_present();
        Ok(TurnOutcome::Wrong)
    }

    pub fn start_alarm(&mut self, max_minutes: u32) -> Result<()> {
        let mut alarm = Alarm::new(max_minutes)?;
        alarm.start(&mut self.rng)?;
        info!("alarm set for at most {} minutes", max_minutes);
        self.alarm = Some(alarm);
        Ok(())
    }

    /// Let `seconds` of game time pass. Returns `true` if the alarm went off.
    pub fn tick(&mut self, seconds: u64) -> bool {
        match self.alarm.as_mut() {
            Some(alarm) => alarm.tick(seconds),
            None => false,
        }
    }

    pub fn pause_alarm(&mut self) {
        if let Some(alarm) = self.alarm.as_mut() {
            alarm.pause();
        }
    }

    pub fn resume_alarm(&mut self) {
        if let Some(alarm) = self.alarm.as_mut() {
            alarm.resume();
        }
    }

    pub fn is_locked(&self) -> bool {
        self.alarm.as_ref().map(|a| a.is_locked()).unwrap_or(false)
    }

    pub fn summary(&self) -> GameSummary {
        let winner = if self.is_locked() {
            self.current_player().cloned()
        } else {
            None
        };
        GameSummary {
            winner,
            smartest: self.roster.smartest().into_iter().cloned().collect(),
            questions_shown: self.shown_count(),
            time_finished: chrono::Local::now(),
        }
    }

    /// Whoever holds the present, if the game has named players.
    pub fn current_player(&self) -> Option<&Player> {
        self.roster.get(self.current_player)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn alarm(&self) -> Option<&Alarm> {
        self.alarm.as_ref()
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// How many questions of this session's corpus have been shown this round.
    pub fn shown_count(&self) -> usize {
        self.shown.restricted_to(&self.corpus).len()
    }

    pub fn corpus_len(&self) -> usize {
        self.corpus.len()
    }

    pub fn weighted_len(&self) -> usize {
        self.weighted.len()
    }

    fn check_unlocked(&self) -> Result<()> {
        if self.is_locked() {
            Err(QuizError::GameLocked)
        } else {
            Ok(())
        }
    }

    fn pass_present(&mut self) {
        self.streak = 0;
        if !self.roster.is_empty() {
            self.current_player = self.roster.next_index(self.current_player);
            self.rebuild_weighted();
        }
        self.page += 1;
    }

    fn current_age(&self) -> Option<u32> {
        self.current_player().map(|p| p.age)
    }

    fn regenerate(&mut self) {
        let (pool, shown) = generate(&self.corpus, &self.shown, &mut self.tracker, &mut self.rng);
        self.pool = pool;
        self.shown = shown;
        self.rebuild_weighted();
    }

    /// Re-sample the questions of the candidate pool that are still unshown for the
    /// current player.
    fn rebuild_weighted(&mut self) {
        let unshown: Vec<Question> = self.pool.iter()
            .filter(|q| !self.shown.contains(q.id))
            .cloned()
            .collect();
        if unshown.len() == 0 {
            self.regenerate();
            return;
        }

        let age = self.current_age();
        let weighted = build_weighted_pool(&unshown, age, &mut self.rng);
        if weighted.len() == 0 {
            // Too few questions left to hit any target; ask what is left.
            debug!("weighted pool is empty, using the {} remaining questions", unshown.len());
            self.weighted = unshown;
        } else {
            self.weighted = weighted;
        }

        if let Some(player) = self.current_player() {
            info!(
                "weighted pool for {} ({}): {} questions",
                player.name, player.age, self.weighted.len(),
            );
        }
    }
}
