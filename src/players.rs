/**
 * The players taking part in a game. The order of the roster is the order in which the
 * present is passed around.
 *
 * Version: November 2025
 */
use super::common::{QuizError, Result};


pub const MIN_PLAYERS: usize = 2;


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub age: u32,
    pub score: u32,
}


#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<Player>,
}


impl Roster {
    pub fn new() -> Self {
        Roster::default()
    }

    /// Add a player at the end of the turn order. The name is trimmed and must not be
    /// empty, and the age must be positive.
    pub fn add(&mut self, name: &str, age: u32) -> Result<()> {
        let name = name.trim();
        if name.len() == 0 {
            return Err(QuizError::InvalidPlayer(String::from("name is empty")));
        }
        if age == 0 {
            return Err(QuizError::InvalidPlayer(format!("{} must be at least 1 year old", name)));
        }

        self.players.push(Player { name: name.to_string(), age, score: 0 });
        Ok(())
    }

    /// Parse a player written as `NAME:AGE` and add them.
    pub fn add_from_str(&mut self, text: &str) -> Result<()> {
        let colon = text.rfind(':').ok_or_else(|| {
            QuizError::InvalidPlayer(format!("expected NAME:AGE, got '{}'", text))
        })?;
        let age = text[colon+1..].trim().parse::<u32>().map_err(|_| {
            QuizError::InvalidPlayer(format!("'{}' is not a valid age", &text[colon+1..]))
        })?;
        self.add(&text[..colon], age)
    }

    /// Remove the player at `index`. Does nothing if there is no such player.
    pub fn remove(&mut self, index: usize) {
        if index < self.players.len() {
            self.players.remove(index);
        }
    }

    /// The index of whoever gets the present after the player at `current`.
    pub fn next_index(&self, current: usize) -> usize {
        if self.players.len() == 0 {
            0
        } else {
            (current + 1) % self.players.len()
        }
    }

    pub fn increment_score(&mut self, index: usize) {
        if let Some(player) = self.players.get_mut(index) {
            player.score += 1;
        }
    }

    pub fn reset_scores(&mut self) {
        for player in self.players.iter_mut() {
            player.score = 0;
        }
    }

    pub fn can_start(&self) -> bool {
        self.players.len() >= MIN_PLAYERS
    }

    /// The players with the highest score, in turn order. Everyone who ties for first
    /// place is included.
    pub fn smartest(&self) -> Vec<&Player> {
        let best = match self.players.iter().map(|p| p.score).max() {
            Some(best) => best,
            None => {
                return Vec::new();
            }
        };
        self.players.iter().filter(|p| p.score == best).collect()
    }

    pub fn get(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
