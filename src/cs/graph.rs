use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, VecDeque};
use std::hash::Hash;

use crate::error::{MathError, Result};

/// Adjacency-list graph. Nodes keep their insertion order, which fixes the order
/// in which traversals visit neighbors and in which topological sort seeds its queue.
#[derive(Debug, Clone)]
pub struct Graph<N> {
    nodes: Vec<N>,
    index: HashMap<N, usize>,
    adjacency: Vec<Vec<(usize, f64)>>,
}

impl<N> Default for Graph<N> {
    fn default() -> Self {
        Graph {
            nodes: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
        }
    }
}

impl<N: Clone + Eq + Hash> Graph<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `node` if absent and return its position.
    pub fn add_node(&mut self, node: N) -> usize {
        if let Some(&idx) = self.index.get(&node) {
            return idx;
        }
        let idx = self.nodes.len();
        self.index.insert(node.clone(), idx);
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        idx
    }

    /// Directed edge `from -> to`; both endpoints are added as needed.
    pub fn add_edge(&mut self, from: N, to: N, weight: f64) {
        let from = self.add_node(from);
        let to = self.add_node(to);
        self.adjacency[from].push((to, weight));
    }

    /// Edges in both directions.
    pub fn add_undirected_edge(&mut self, a: N, b: N, weight: f64) {
        self.add_edge(a.clone(), b.clone(), weight);
        self.add_edge(b, a, weight);
    }

    /// Successors of `node` with edge weights, in insertion order.
    pub fn neighbors<'a>(&'a self, node: &N) -> impl Iterator<Item = (&'a N, f64)> + use<'a, N> {
        let edges: &[(usize, f64)] = match self.index.get(node) {
            Some(&idx) => self.adjacency[idx].as_slice(),
            None => &[],
        };
        edges.iter().map(|&(to, w)| (&self.nodes[to], w))
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn contains(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }
}

/// Breadth-first visit order from `start`. An unknown start visits nothing.
pub fn bfs<N: Clone + Eq + Hash>(graph: &Graph<N>, start: &N) -> Vec<N> {
    let Some(&start) = graph.index.get(start) else {
        return Vec::new();
    };
    let mut visited = vec![false; graph.len()];
    let mut order = Vec::new();
    let mut queue = VecDeque::from([start]);
    visited[start] = true;
    while let Some(u) = queue.pop_front() {
        order.push(graph.nodes[u].clone());
        for &(v, _) in &graph.adjacency[u] {
            if !visited[v] {
                visited[v] = true;
                queue.push_back(v);
            }
        }
    }
    order
}

/// Depth-first preorder from `start`, following neighbors in insertion order.
pub fn dfs<N: Clone + Eq + Hash>(graph: &Graph<N>, start: &N) -> Vec<N> {
    let Some(&start) = graph.index.get(start) else {
        return Vec::new();
    };
    let mut visited = vec![false; graph.len()];
    let mut order = Vec::new();
    let mut stack = vec![start];
    while let Some(u) = stack.pop() {
        if visited[u] {
            continue;
        }
        visited[u] = true;
        order.push(graph.nodes[u].clone());
        // Reversed so the first neighbor is popped first.
        stack.extend(
            graph.adjacency[u]
                .iter()
                .rev()
                .map(|&(v, _)| v)
                .filter(|&v| !visited[v]),
        );
    }
    order
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Visit {
    dist: f64,
    node: usize,
}

impl Eq for Visit {}

impl Ord for Visit {
    // Reversed so `BinaryHeap` pops the smallest distance.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Visit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest distances from `source` to every reachable node.
///
/// Negative edge weights are rejected before the search starts.
pub fn dijkstra<N: Clone + Eq + Hash>(graph: &Graph<N>, source: &N) -> Result<HashMap<N, f64>> {
    if let Some(w) = graph
        .adjacency
        .iter()
        .flatten()
        .map(|&(_, w)| w)
        .find(|w| *w < 0.0 || w.is_nan())
    {
        return Err(MathError::domain(format!(
            "dijkstra requires non-negative weights, found {w}"
        )));
    }
    let Some(&source) = graph.index.get(source) else {
        return Err(MathError::domain("source node is not in the graph"));
    };

    let mut dist: Vec<Option<f64>> = vec![None; graph.len()];
    dist[source] = Some(0.0);
    let mut heap = BinaryHeap::from([Visit {
        dist: 0.0,
        node: source,
    }]);
    while let Some(Visit { dist: d, node: u }) = heap.pop() {
        if dist[u].is_some_and(|best| d > best) {
            continue;
        }
        for &(v, w) in &graph.adjacency[u] {
            let candidate = d + w;
            if dist[v].is_none_or(|best| candidate < best) {
                dist[v] = Some(candidate);
                heap.push(Visit {
                    dist: candidate,
                    node: v,
                });
            }
        }
    }

    Ok(dist
        .into_iter()
        .enumerate()
        .filter_map(|(i, d)| d.map(|d| (graph.nodes[i].clone(), d)))
        .collect())
}

/// Kahn's algorithm. Fails with [`MathError::Cycle`] when no ordering exists.
pub fn topological_sort<N: Clone + Eq + Hash>(graph: &Graph<N>) -> Result<Vec<N>> {
    let mut in_degree = vec![0usize; graph.len()];
    for &(v, _) in graph.adjacency.iter().flatten() {
        in_degree[v] += 1;
    }
    let mut queue: VecDeque<usize> = (0..graph.len()).filter(|&u| in_degree[u] == 0).collect();
    let mut order = Vec::with_capacity(graph.len());
    while let Some(u) = queue.pop_front() {
        order.push(graph.nodes[u].clone());
        for &(v, _) in &graph.adjacency[u] {
            in_degree[v] -= 1;
            if in_degree[v] == 0 {
                queue.push_back(v);
            }
        }
    }
    if order.len() != graph.len() {
        return Err(MathError::Cycle);
    }
    Ok(order)
}
