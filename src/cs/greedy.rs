/// Maximum set of non-overlapping `(start, finish)` intervals, earliest finish first.
///
/// An interval may start exactly when the previous one finishes.
pub fn activity_selection<T: Ord + Copy>(intervals: &[(T, T)]) -> Vec<(T, T)> {
    let mut sorted = intervals.to_vec();
    sorted.sort_by_key(|&(_, finish)| finish);
    let mut chosen: Vec<(T, T)> = Vec::new();
    for (start, finish) in sorted {
        if chosen.last().is_none_or(|&(_, last)| start >= last) {
            chosen.push((start, finish));
        }
    }
    chosen
}
