/**
 * Tests for the shown-question cycle across restarts, using an on-disk database the way
 * the `play` subcommand does.
 */
use std::collections::HashSet;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use sintspel::players::Roster;
use sintspel::storage::{SqliteStorage, Storage};
use sintspel::tracker::{ShownTracker, SHOWN_QUESTIONS_KEY};
use sintspel::{Corpus, QuestionId, Session};


#[test]
fn questions_do_not_repeat_across_restarts() {
    let dir = TempDir::new().unwrap();
    let corpus = Corpus::builtin().unwrap();
    let total = corpus.len();

    let mut seen = HashSet::new();
    let mut first = open_session(dir.path(), corpus.clone(), 1);
    for _ in 0..10 {
        assert!(seen.insert(ask(&mut first)));
    }
    drop(first);

    let mut second = open_session(dir.path(), corpus.clone(), 2);
    assert_eq!(second.shown_count(), 10);
    for _ in 10..total {
        let id = ask(&mut second);
        assert!(seen.insert(id), "question {} repeated", id);
    }
    assert_eq!(seen.len(), total);

    // Every question has been shown, so the next session starts a fresh cycle.
    drop(second);
    let third = open_session(dir.path(), corpus, 3);
    assert_eq!(third.shown_count(), 0);
}

#[test]
fn players_of_all_ages_never_see_a_repeat() {
    let dir = TempDir::new().unwrap();
    let corpus = Corpus::builtin().unwrap();
    let total = corpus.len();

    let mut roster = Roster::new();
    roster.add_from_str("Piet:7").unwrap();
    roster.add_from_str("Anna:14").unwrap();
    roster.add_from_str("Opa:72").unwrap();
    let storage = SqliteStorage::open(&dir.path().join("storage.sqlite3")).unwrap();
    let mut session = Session::new(corpus, Box::new(storage), roster, StdRng::seed_from_u64(9)).unwrap();

    let mut seen = HashSet::new();
    for i in 0..total {
        let id = session.current_question().unwrap().id;
        assert!(seen.insert(id), "question {} repeated", id);
        if i % 3 == 0 {
            session.wrong().unwrap();
        } else {
            session.correct().unwrap();
        }
    }
    assert_eq!(seen.len(), total);
}

#[test]
fn reset_makes_every_question_available() {
    let dir = TempDir::new().unwrap();
    let corpus = Corpus::builtin().unwrap();

    let mut session = open_session(dir.path(), corpus.clone(), 4);
    for _ in 0..5 {
        ask(&mut session);
    }
    drop(session);

    let mut tracker = ShownTracker::new(Box::new(open_storage(dir.path())));
    assert_eq!(tracker.load().len(), 5);
    tracker.reset();
    assert!(tracker.load().is_empty());

    let session = open_session(dir.path(), corpus, 5);
    assert_eq!(session.shown_count(), 0);
}

#[test]
fn malformed_stored_data_starts_a_new_cycle() {
    let dir = TempDir::new().unwrap();
    let mut storage = open_storage(dir.path());
    storage.set(SHOWN_QUESTIONS_KEY, "{not json").unwrap();
    drop(storage);

    let mut session = open_session(dir.path(), Corpus::builtin().unwrap(), 6);
    assert_eq!(session.shown_count(), 0);
    ask(&mut session);

    let stored = open_storage(dir.path()).get(SHOWN_QUESTIONS_KEY).unwrap().unwrap();
    let ids: Vec<QuestionId> = serde_json::from_str(&stored).unwrap();
    assert_eq!(ids.len(), 1);
}

#[test]
fn filtered_game_keeps_history_of_other_types() {
    let dir = TempDir::new().unwrap();
    let corpus = Corpus::builtin().unwrap();
    let kennis = ids_of_type(&corpus, "kennis");
    let shown: Vec<QuestionId> = kennis.iter().cloned().take(5).collect();
    let mut storage = open_storage(dir.path());
    storage.set(SHOWN_QUESTIONS_KEY, &serde_json::to_string(&shown).unwrap()).unwrap();
    drop(storage);

    let actie = corpus.filter_by_type(&[String::from("actie")]).unwrap();
    let mut filtered = open_session(dir.path(), actie, 7);
    assert_eq!(filtered.shown_count(), 0);
    let id = ask(&mut filtered);
    assert!(!kennis.contains(&id));
    drop(filtered);

    let unfiltered = open_session(dir.path(), corpus, 8);
    assert_eq!(unfiltered.shown_count(), shown.len() + 1);
}

#[test]
fn finishing_a_filtered_round_keeps_history_of_other_types() {
    let dir = TempDir::new().unwrap();
    let corpus = Corpus::builtin().unwrap();
    let shown: Vec<QuestionId> = ids_of_type(&corpus, "kennis").into_iter().take(4).collect();
    let mut storage = open_storage(dir.path());
    storage.set(SHOWN_QUESTIONS_KEY, &serde_json::to_string(&shown).unwrap()).unwrap();
    drop(storage);

    let actie = corpus.filter_by_type(&[String::from("actie")]).unwrap();
    let mut filtered = open_session(dir.path(), actie.clone(), 11);
    let seen: HashSet<QuestionId> = (0..actie.len()).map(|_| ask(&mut filtered)).collect();
    assert_eq!(seen.len(), actie.len());
    assert_eq!(filtered.shown_count(), 0);
    drop(filtered);

    let stored = open_storage(dir.path()).get(SHOWN_QUESTIONS_KEY).unwrap().unwrap();
    let ids: Vec<QuestionId> = serde_json::from_str(&stored).unwrap();
    assert_eq!(ids, shown);

    let unfiltered = open_session(dir.path(), corpus, 12);
    assert_eq!(unfiltered.shown_count(), shown.len());
}

fn ids_of_type(corpus: &Corpus, kind: &str) -> Vec<QuestionId> {
    corpus.filter_by_type(&[String::from(kind)]).unwrap()
        .questions().iter().map(|q| q.id).collect()
}

fn open_storage(dir: &Path) -> SqliteStorage {
    SqliteStorage::open(&dir.join("storage.sqlite3")).unwrap()
}

fn open_session(dir: &Path, corpus: Corpus, seed: u64) -> Session {
    let storage = open_storage(dir);
    Session::new(corpus, Box::new(storage), Roster::new(), StdRng::seed_from_u64(seed)).unwrap()
}

fn ask(session: &mut Session) -> QuestionId {
    let id = session.current_question().unwrap().id;
    session.skip(1).unwrap();
    id
}
