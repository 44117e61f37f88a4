/**
 * Keep track of which questions have already been shown so that no question repeats
 * until every question in the corpus has had its turn. The list survives restarts by
 * being written through to storage on every change.
 *
 * Storage failures are never passed on to the caller: a failed read looks like an
 * empty list and a failed write leaves only the in-memory copy up to date.
 *
 * Version: November 2025
 */
use std::collections::HashSet;

use log::{debug, warn};

use super::question::{Corpus, QuestionId};
use super::storage::Storage;


pub const SHOWN_QUESTIONS_KEY: &str = "sintspel-shown-questions";


/// The ids of the questions shown so far in this cycle, in the order they were shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShownSet {
    ids: Vec<QuestionId>,
    members: HashSet<QuestionId>,
}


pub struct ShownTracker {
    storage: Box<dyn Storage>,
}


impl ShownSet {
    pub fn new() -> Self {
        ShownSet::default()
    }

    pub fn from_ids<I: IntoIterator<Item = QuestionId>>(ids: I) -> Self {
        let mut set = ShownSet::new();
        for id in ids {
            set.insert(id);
        }
        set
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[QuestionId] {
        &self.ids
    }

    /// Drop ids that do not belong to any question in `corpus`, e.g. left over from an
    /// older set of questions.
    pub fn restricted_to(&self, corpus: &Corpus) -> ShownSet {
        let known: HashSet<QuestionId> = corpus.questions().iter().map(|q| q.id).collect();
        ShownSet::from_ids(self.ids.iter().cloned().filter(|id| known.contains(id)))
    }

    fn insert(&mut self, id: QuestionId) -> bool {
        if self.members.insert(id) {
            self.ids.push(id);
            true
        } else {
            false
        }
    }
}


impl ShownTracker {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        ShownTracker { storage }
    }

    /// Read the shown set from storage. Missing, malformed or unreadable data all give
    /// an empty set.
    pub fn load(&self) -> ShownSet {
        let data = match self.storage.get(SHOWN_QUESTIONS_KEY) {
            Ok(Some(data)) => data,
            Ok(None) => {
                return ShownSet::new();
            },
            Err(e) => {
                warn!("could not load shown questions: {}", e);
                return ShownSet::new();
            }
        };

        match serde_json::from_str::<Vec<QuestionId>>(&data) {
            Ok(ids) => {
                let set = ShownSet::from_ids(ids);
                debug!("{} questions already shown", set.len());
                set
            },
            Err(e) => {
                warn!("ignoring malformed shown questions ({})", e);
                ShownSet::new()
            }
        }
    }

    /// Return `current` with `id` added. If `id` was already shown then `current` is
    /// returned as it is and nothing is written.
    pub fn mark_shown(&mut self, current: &ShownSet, id: QuestionId) -> ShownSet {
        if current.contains(id) {
            return current.clone();
        }

        let mut updated = current.clone();
        updated.insert(id);
        self.save(&updated);
        debug!("question {} marked as shown ({} in total)", id, updated.len());
        updated
    }

    pub fn reset(&mut self) -> ShownSet {
        let empty = ShownSet::new();
        self.save(&empty);
        empty
    }

    /// Return `current` without the ids of the questions in `corpus`, e.g. when every
    /// question of one type has been shown. Ids of other questions stay shown. Resets
    /// the tracker if nothing is left.
    pub fn forget(&mut self, current: &ShownSet, corpus: &Corpus) -> ShownSet {
        let known: HashSet<QuestionId> = corpus.questions().iter().map(|q| q.id).collect();
        let remaining = ShownSet::from_ids(current.ids.iter().cloned().filter(|id| !known.contains(id)));
        if remaining.is_empty() {
            return self.reset();
        }

        self.save(&remaining);
        debug!("{} questions forgotten, {} still shown", current.len() - remaining.len(), remaining.len());
        remaining
    }

    fn save(&mut self, set: &ShownSet) {
        let serialized = match serde_json::to_string(&set.ids) {
            Ok(serialized) => serialized,
            Err(e) => {
                warn!("could not serialize shown questions: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.set(SHOWN_QUESTIONS_KEY, &serialized) {
            warn!("could not save shown questions: {}", e);
        }
    }
}
