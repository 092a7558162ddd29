mod dynamic;
mod graph;
mod greedy;
mod search;

pub use dynamic::{edit_distance, knapsack_01, longest_increasing_subsequence};
pub use graph::{Graph, bfs, dfs, dijkstra, topological_sort};
pub use greedy::activity_selection;
pub use search::{binary_search, mergesort, quicksort};

/// Typical time complexity of a named operation, e.g. `"binary_search"` gives `"O(log n)"`.
pub fn big_o_notation(operation: &str) -> Option<&'static str> {
    let bound = match operation {
        "binary_search" => "O(log n)",
        "linear_search" => "O(n)",
        "quicksort_avg" | "mergesort" | "heapsort" => "O(n log n)",
        "quicksort_worst" | "insertion_sort" | "bubble_sort" => "O(n^2)",
        "bfs" | "dfs" | "topological_sort" => "O(V + E)",
        "dijkstra" => "O((V + E) log V)",
        "knapsack_01" => "O(n W)",
        "longest_increasing_subsequence" => "O(n log n)",
        "edit_distance" => "O(m n)",
        "activity_selection" => "O(n log n)",
        _ => return None,
    };
    Some(bound)
}
