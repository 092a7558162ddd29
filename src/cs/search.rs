use std::cmp::Ordering;

/// Index of `target` in an ascending slice, or `None`.
pub fn binary_search<T: Ord>(sorted: &[T], target: &T) -> Option<usize> {
    let (mut lo, mut hi) = (0, sorted.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match sorted[mid].cmp(target) {
            Ordering::Equal => return Some(mid),
            Ordering::Less => lo = mid + 1,
            Ordering::Greater => hi = mid,
        }
    }
    None
}

/// In-place quicksort with a middle-element pivot and a three-way partition. Not stable.
///
/// Runs of keys equal to the pivot are settled in one pass, and only the smaller side is
/// recursed into, so the stack depth stays logarithmic.
pub fn quicksort<T: Ord>(mut items: &mut [T]) {
    while items.len() > 1 {
        let slice = std::mem::take(&mut items);
        let (less, greater) = partition3(slice);
        let (left, rest) = slice.split_at_mut(less);
        let right = &mut rest[greater - less..];
        if left.len() < right.len() {
            quicksort(left);
            items = right;
        } else {
            quicksort(right);
            items = left;
        }
    }
}

// After the call `items[..less] < pivot`, `items[less..greater] == pivot` and
// `items[greater..] > pivot`. The pivot region is never empty.
fn partition3<T: Ord>(items: &mut [T]) -> (usize, usize) {
    items.swap(0, items.len() / 2);
    let (mut less, mut i, mut greater) = (0, 1, items.len());
    while i < greater {
        match items[i].cmp(&items[less]) {
            Ordering::Less => {
                items.swap(less, i);
                less += 1;
                i += 1;
            }
            Ordering::Greater => {
                greater -= 1;
                items.swap(i, greater);
            }
            Ordering::Equal => i += 1,
        }
    }
    (less, greater)
}

/// Stable top-down mergesort into a new vector.
pub fn mergesort<T: Ord + Clone>(items: &[T]) -> Vec<T> {
    if items.len() <= 1 {
        return items.to_vec();
    }
    let (left, right) = items.split_at(items.len() / 2);
    merge(mergesort(left), mergesort(right))
}

fn merge<T: Ord>(left: Vec<T>, right: Vec<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => l <= r,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_left { left.next() } else { right.next() };
        out.extend(next);
    }
    out
}
