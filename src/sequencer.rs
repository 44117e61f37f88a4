use super::question::Question;


/// Return the question on page `page` of `pool`, wrapping around at either end so that
/// paging backwards past the start still lands on a question. `None` if `pool` is empty.
pub fn select_current(pool: &[Question], page: i64) -> Option<&Question> {
    if pool.len() == 0 {
        return None;
    }
    let index = (page.unsigned_abs() % (pool.len() as u64)) as usize;
    pool.get(index)
}
