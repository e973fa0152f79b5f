//! Uninformed traversals: DFS, BFS, uniform-cost search and iterative deepening.
//!
//! DFS, BFS and UCS are lazy iterators over a borrowed [`GraphStore`]. They are
//! finite for acyclic input and are consumed as they are read. None of them
//! detects cycles unless asked to: on a cyclic graph DFS never ends, which
//! callers can observe with [`Iterator::take`]. [`Dfs::with_cycle_guard`] opts
//! into skipping already-visited nodes.
//!
//! All traversals use explicit stacks or queues, so deep graphs do not grow the
//! call stack. Visitation order is the same as the textbook recursive forms.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet, VecDeque};
use std::ops::Add;

use log::debug;

use crate::graph::{GraphStore, NodeId};

// =============================================================================
// Depth-First Search
// =============================================================================

/// Pre-order depth-first traversal.
pub struct Dfs<'g> {
    graph: &'g GraphStore,
    stack: Vec<NodeId>,
    seen: Option<HashSet<NodeId>>,
}

/// Start a depth-first traversal.
///
/// `start` may be `None`, in which case nothing is visited.
pub fn dfs(graph: &GraphStore, start: impl Into<Option<NodeId>>) -> Dfs<'_> {
    Dfs {
        graph,
        stack: start.into().into_iter().collect(),
        seen: None,
    }
}

impl Dfs<'_> {
    /// Skip nodes that were already visited. Makes DFS terminate on cyclic
    /// graphs, and visits each node of a DAG once.
    pub fn with_cycle_guard(mut self) -> Self {
        self.seen = Some(HashSet::new());
        self
    }
}

impl Iterator for Dfs<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let node = self.stack.pop()?;
            if let Some(seen) = &mut self.seen {
                if !seen.insert(node.clone()) {
                    continue;
                }
            }
            // Reversed so the first child is popped first
            self.stack
                .extend(self.graph.children_of(&node).iter().rev().cloned());
            return Some(node);
        }
    }
}

// =============================================================================
// Breadth-First Search
// =============================================================================

/// Level-order traversal with a FIFO queue.
pub struct Bfs<'g> {
    graph: &'g GraphStore,
    queue: VecDeque<NodeId>,
}

pub fn bfs(graph: &GraphStore, root: impl Into<Option<NodeId>>) -> Bfs<'_> {
    Bfs {
        graph,
        queue: root.into().into_iter().collect(),
    }
}

impl Iterator for Bfs<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.queue.pop_front()?;
        self.queue
            .extend(self.graph.children_of(&node).iter().cloned());
        Some(node)
    }
}

// =============================================================================
// Uniform-Cost Search
// =============================================================================

/// Uniform-cost traversal over an arbitrary edge cost.
///
/// Entries are ordered by `(cost, insertion order)`, so nodes of equal cost
/// come out first-in first-out. With unit edge costs this is exactly BFS.
pub struct Ucs<'g, C, F> {
    graph: &'g GraphStore,
    heap: BinaryHeap<Reverse<(C, u64, NodeId)>>,
    edge_cost: F,
    pushed: u64,
}

/// Uniform-cost search where every edge costs 1.
pub fn ucs(graph: &GraphStore, root: impl Into<Option<NodeId>>) -> impl Iterator<Item = NodeId> + '_ {
    ucs_with_cost(graph, root, |_: &NodeId, _: &NodeId| 1u32).map(|(_, node)| node)
}

/// Uniform-cost search with a caller-supplied `edge_cost(parent, child)`.
///
/// Yields `(path cost, node)` in non-decreasing cost order.
pub fn ucs_with_cost<C, F>(graph: &GraphStore, root: impl Into<Option<NodeId>>, edge_cost: F) -> Ucs<'_, C, F>
where
    C: Copy + Ord + Default + Add<Output = C>,
    F: FnMut(&NodeId, &NodeId) -> C,
{
    let mut ucs = Ucs {
        graph,
        heap: BinaryHeap::new(),
        edge_cost,
        pushed: 0,
    };
    if let Some(root) = root.into() {
        ucs.push(C::default(), root);
    }
    ucs
}

impl<C, F> Ucs<'_, C, F>
where
    C: Copy + Ord,
{
    fn push(&mut self, cost: C, node: NodeId) {
        self.heap.push(Reverse((cost, self.pushed, node)));
        self.pushed += 1;
    }
}

impl<C, F> Iterator for Ucs<'_, C, F>
where
    C: Copy + Ord + Default + Add<Output = C>,
    F: FnMut(&NodeId, &NodeId) -> C,
{
    type Item = (C, NodeId);

    fn next(&mut self) -> Option<(C, NodeId)> {
        let Reverse((cost, _, node)) = self.heap.pop()?;
        let graph = self.graph;
        for child in graph.children_of(&node) {
            let step = (self.edge_cost)(&node, child);
            self.push(cost + step, child.clone());
        }
        Some((cost, node))
    }
}

// =============================================================================
// Iterative-Deepening DFS
// =============================================================================

/// Result of an iterative-deepening run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IddfsOutcome {
    /// Nodes that sat exactly on the depth boundary of some iteration, in
    /// visit order. Interior nodes are walked through but not recorded.
    pub visited: Vec<NodeId>,
    /// The first goal hit and the depth it was found at. `None` once every
    /// depth up to the limit has been tried.
    pub found: Option<(NodeId, usize)>,
}

/// Iterative deepening from `root` for depths `0..=depth_limit`.
///
/// Each iteration is a depth-limited DFS that only tests nodes whose remaining
/// budget is zero. The first node passing `is_goal` stops the whole search.
pub fn iddfs<F>(graph: &GraphStore, root: &NodeId, depth_limit: usize, mut is_goal: F) -> IddfsOutcome
where
    F: FnMut(&NodeId) -> bool,
{
    let mut visited = Vec::new();
    for depth in 0..=depth_limit {
        debug!("iddfs: depth {depth}");
        if let Some(hit) = depth_limited(graph, root, depth, &mut visited, &mut is_goal) {
            return IddfsOutcome {
                visited,
                found: Some((hit, depth)),
            };
        }
    }
    IddfsOutcome {
        visited,
        found: None,
    }
}

/// Iterative deepening where reaching the depth boundary is itself success.
///
/// Any node at depth 0 qualifies, so this always stops on the root.
pub fn iddfs_any(graph: &GraphStore, root: &NodeId, depth_limit: usize) -> IddfsOutcome {
    iddfs(graph, root, depth_limit, |_| true)
}

fn depth_limited<F>(
    graph: &GraphStore,
    root: &NodeId,
    depth: usize,
    visited: &mut Vec<NodeId>,
    is_goal: &mut F,
) -> Option<NodeId>
where
    F: FnMut(&NodeId) -> bool,
{
    let mut stack = vec![(root.clone(), depth)];
    while let Some((node, remaining)) = stack.pop() {
        if remaining == 0 {
            visited.push(node.clone());
            if is_goal(&node) {
                return Some(node);
            }
            continue;
        }
        stack.extend(
            graph
                .children_of(&node)
                .iter()
                .rev()
                .map(|child| (child.clone(), remaining - 1)),
        );
    }
    None
}
