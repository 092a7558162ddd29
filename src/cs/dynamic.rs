use crate::error::{MathError, Result};

/// Best total value of items whose weights fit in `capacity`, each used at most once.
pub fn knapsack_01(weights: &[usize], values: &[u64], capacity: usize) -> Result<u64> {
    if weights.len() != values.len() {
        return Err(MathError::shape(
            format!("{} values", weights.len()),
            format!("{} values", values.len()),
        ));
    }
    let mut best = vec![0u64; capacity + 1];
    for (&w, &v) in weights.iter().zip(values) {
        // Descending capacity so each item is counted once.
        for c in (w..=capacity).rev() {
            best[c] = best[c].max(best[c - w] + v);
        }
    }
    Ok(best[capacity])
}

/// Length of the longest strictly increasing subsequence, by patience sorting.
pub fn longest_increasing_subsequence<T: Ord + Clone>(items: &[T]) -> usize {
    let mut tails: Vec<T> = Vec::new();
    for x in items {
        let idx = tails.partition_point(|t| t < x);
        if idx == tails.len() {
            tails.push(x.clone());
        } else {
            tails[idx] = x.clone();
        }
    }
    tails.len()
}

/// Levenshtein distance counted in characters.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
