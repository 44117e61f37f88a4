/**
 * The question corpus: every question the game can ask, with a difficulty tag that the
 * age weighting uses to pick a mix of questions for each player.
 *
 * Version: November 2025
 */
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::common::{QuizError, Result};


/// The questions that ship with the game.
const BUILTIN_QUESTIONS: &str = include_str!("../data/questions.json");


pub type QuestionId = u64;


#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy, Medium, Hard,
}


impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Position of the difficulty in `ALL`, used to index per-bucket arrays.
    pub fn index(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }
}


/// Represents a question.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Question {
    pub id: QuestionId,
    pub difficulty: Difficulty,
    /// A label such as "kennis" or "actie" shown above the question.
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub answer: String,
    /// Seconds the player gets once the answer has been revealed, if the question is
    /// timed.
    #[serde(rename = "timeLimit", default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
}


/// The fixed collection of questions for a session. Ids are guaranteed to be unique.
#[derive(Debug, Clone)]
pub struct Corpus {
    questions: Vec<Question>,
}


impl Question {
    pub fn new(id: QuestionId, difficulty: Difficulty, text: &str, answer: &str) -> Self {
        Question {
            id,
            difficulty,
            kind: String::from("kennis"),
            text: String::from(text),
            answer: String::from(answer),
            time_limit: None,
        }
    }
}


impl Corpus {
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        if questions.len() == 0 {
            return Err(QuizError::EmptyCorpus);
        }

        let mut seen = HashSet::new();
        for q in questions.iter() {
            if !seen.insert(q.id) {
                return Err(QuizError::DuplicateQuestionId(q.id));
            }
        }
        Ok(Corpus { questions })
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let questions: Vec<Question> = serde_json::from_str(data).map_err(QuizError::Json)?;
        Corpus::new(questions)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(QuizError::Io)?;
        Corpus::from_json(&data)
    }

    pub fn builtin() -> Result<Self> {
        Corpus::from_json(BUILTIN_QUESTIONS)
    }

    /// Return a corpus with only the questions whose type is one of `kinds`. The
    /// comparison ignores case.
    pub fn filter_by_type(&self, kinds: &[String]) -> Result<Self> {
        let questions = self.questions.iter()
            .filter(|q| kinds.iter().any(|k| k.eq_ignore_ascii_case(&q.kind)))
            .cloned()
            .collect();
        Corpus::new(questions)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }
}
