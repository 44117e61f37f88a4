/**
 * Build the pool of candidate questions: every question that has not been shown yet,
 * in random order. Once everything has been shown the cycle starts over with the whole
 * corpus.
 *
 * Version: November 2025
 */
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

use super::question::{Corpus, Question};
use super::tracker::{ShownSet, ShownTracker};


/// Return a uniformly shuffled copy of `items`. The input is left alone.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}


/// Return the candidate pool for `shown`, along with the shown set to use from now on.
///
/// If `shown` already covers the corpus, the corpus ids are forgotten and the pool is the
/// whole corpus; otherwise the pool holds exactly the questions whose ids are not in
/// `shown`. Ids in `shown` that are not in `corpus` are kept, since they may belong to
/// questions left out by a filter.
pub fn generate<R: Rng + ?Sized>(
    corpus: &Corpus,
    shown: &ShownSet,
    tracker: &mut ShownTracker,
    rng: &mut R,
) -> (Vec<Question>, ShownSet) {
    if shown.restricted_to(corpus).len() >= corpus.len() {
        info!("all {} questions have been shown, starting a new round", corpus.len());
        let shown = tracker.forget(shown, corpus);
        return (shuffle(corpus.questions(), rng), shown);
    }

    let unshown: Vec<Question> = corpus.questions().iter()
        .filter(|q| !shown.contains(q.id))
        .cloned()
        .collect();
    info!("{} of {} questions not yet shown", unshown.len(), corpus.len());
    (shuffle(&unshown, rng), shown.clone())
}


/// Return `true` if every question in `pool` has been shown since the pool was built,
/// meaning it should be generated again.
pub fn is_exhausted(pool: &[Question], shown: &ShownSet) -> bool {
    pool.iter().all(|q| shown.contains(q.id))
}


#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::question::{Difficulty, QuestionId};
    use crate::storage::{MemoryStorage, Storage};
    use crate::tracker::tests::SharedStorage;
    use crate::tracker::SHOWN_QUESTIONS_KEY;

    fn corpus(n: u64) -> Corpus {
        let questions = (1..=n)
            .map(|id| Question::new(id, Difficulty::Easy, "Q", "A"))
            .collect();
        Corpus::new(questions).unwrap()
    }

    fn ids(pool: &[Question]) -> Vec<QuestionId> {
        pool.iter().map(|q| q.id).collect()
    }

    fn tracker() -> ShownTracker {
        ShownTracker::new(Box::new(MemoryStorage::new()))
    }

    #[test]
    fn shuffle_keeps_every_element() {
        let mut rng = StdRng::seed_from_u64(1);
        let items: Vec<u32> = (0..50).collect();
        let mut shuffled = shuffle(&items, &mut rng);

        assert_eq!(items, (0..50).collect::<Vec<u32>>());
        shuffled.sort();
        assert_eq!(shuffled, items);
    }

    #[test]
    fn shuffle_handles_tiny_inputs() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(shuffle::<u32, _>(&[], &mut rng), Vec::<u32>::new());
        assert_eq!(shuffle(&[7], &mut rng), vec![7]);
    }

    #[test]
    fn shuffle_produces_different_orders() {
        let mut rng = StdRng::seed_from_u64(2);
        let items: Vec<u32> = (0..20).collect();
        let orders: HashSet<Vec<u32>> = (0..10).map(|_| shuffle(&items, &mut rng)).collect();
        assert!(orders.len() > 1);
    }

    #[test]
    fn fresh_start_gives_whole_corpus() {
        let mut rng = StdRng::seed_from_u64(3);
        let corpus = corpus(10);
        let (pool, shown) = generate(&corpus, &ShownSet::new(), &mut tracker(), &mut rng);

        let mut pool_ids = ids(&pool);
        pool_ids.sort();
        assert_eq!(pool_ids, (1..=10).collect::<Vec<QuestionId>>());
        assert!(shown.is_empty());
    }

    #[test]
    fn shown_questions_are_left_out() {
        let mut rng = StdRng::seed_from_u64(4);
        let corpus = corpus(10);
        let shown = ShownSet::from_ids(vec![2, 4, 6]);
        let (pool, kept) = generate(&corpus, &shown, &mut tracker(), &mut rng);

        assert_eq!(pool.len(), 7);
        assert!(pool.iter().all(|q| !shown.contains(q.id)));
        assert_eq!(kept, shown);
    }

    #[test]
    fn full_cycle_resets_tracker() {
        let mut rng = StdRng::seed_from_u64(5);
        let storage = SharedStorage::default();
        let mut tracker = ShownTracker::new(Box::new(storage.clone()));
        let corpus = corpus(30);
        let shown = ShownSet::from_ids(1..=30);

        let (pool, shown) = generate(&corpus, &shown, &mut tracker, &mut rng);
        assert!(shown.is_empty());
        assert_eq!(pool.len(), 30);
        let unique: HashSet<QuestionId> = ids(&pool).into_iter().collect();
        assert_eq!(unique.len(), 30);
        assert_eq!(storage.get(SHOWN_QUESTIONS_KEY).unwrap(), Some(String::from("[]")));
    }

    #[test]
    fn new_round_keeps_ids_outside_the_corpus() {
        let mut rng = StdRng::seed_from_u64(6);
        let corpus = corpus(3);
        let shown = ShownSet::from_ids(vec![1, 4, 2, 3, 5]);
        let (pool, shown) = generate(&corpus, &shown, &mut tracker(), &mut rng);
        assert_eq!(pool.len(), 3);
        assert_eq!(shown.ids(), &[4, 5]);
    }

    #[test]
    fn ids_outside_the_corpus_do_not_count_towards_a_round() {
        let mut rng = StdRng::seed_from_u64(8);
        let corpus = corpus(3);
        let shown = ShownSet::from_ids(vec![1, 4, 5, 6]);
        let (pool, kept) = generate(&corpus, &shown, &mut tracker(), &mut rng);

        let mut pool_ids = ids(&pool);
        pool_ids.sort();
        assert_eq!(pool_ids, vec![2, 3]);
        assert_eq!(kept, shown);
    }

    #[test]
    fn never_repeats_until_everything_is_shown() {
        let mut rng = StdRng::seed_from_u64(7);
        let corpus = corpus(12);
        let mut tracker = tracker();
        let mut shown = ShownSet::new();

        for _ in 0..12 {
            let (pool, next) = generate(&corpus, &shown, &mut tracker, &mut rng);
            assert!(pool.iter().all(|q| !next.contains(q.id)));
            shown = tracker.mark_shown(&next, pool[0].id);
        }
        assert_eq!(shown.len(), 12);

        let (pool, shown) = generate(&corpus, &shown, &mut tracker, &mut rng);
        assert_eq!(pool.len(), 12);
        assert!(shown.is_empty());
    }

    #[test]
    fn exhausted_pool_is_detected() {
        let corpus = corpus(5);
        let pool = corpus.questions()[..2].to_vec();
        assert!(!is_exhausted(&pool, &ShownSet::from_ids(vec![1])));
        assert!(is_exhausted(&pool, &ShownSet::from_ids(vec![1, 2])));
        assert!(is_exhausted(&[], &ShownSet::new()));
    }
}
