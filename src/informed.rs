//! Informed searches: A*, Best-First and Greedy.
//!
//! The two ordering policies are kept apart on purpose:
//! - A* pops the smallest `(f, g, node)` where `f = g + h(node)`, reading `h` as
//!   an estimated cost to the goal.
//! - Best-First and Greedy pop the smallest `(h(node), node)`, reading `h` as a
//!   desirability score (lower is better) with no path cost involved.
//!
//! Best-First keeps a closed set. Greedy does not, so a node reachable along
//! several paths is queued and visited once per path.
//!
//! An exhausted frontier is reported as `goal: None`. A frontier node without
//! a heuristic entry aborts the search with [`SearchError::MissingHeuristic`].

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use log::trace;

use crate::error::SearchError;
use crate::graph::{GraphStore, Heuristic, NodeId};

/// Path from the root to the goal, with its edge count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalPath {
    pub path: Vec<NodeId>,
    pub cost: u32,
}

/// Everything an informed search produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Nodes in the order they were popped and expanded.
    pub visited: Vec<NodeId>,
    /// `None` if the frontier ran dry before reaching the goal.
    pub goal: Option<GoalPath>,
}

impl SearchOutcome {
    pub fn found(&self) -> bool {
        self.goal.is_some()
    }
}

/// Expanded nodes and the index of the entry they were reached from.
#[derive(Default)]
struct Trail {
    steps: Vec<(NodeId, Option<usize>)>,
}

impl Trail {
    fn record(&mut self, node: NodeId, parent: Option<usize>) -> usize {
        self.steps.push((node, parent));
        self.steps.len() - 1
    }

    fn path_to(&self, mut idx: usize) -> Vec<NodeId> {
        let mut path = Vec::new();
        loop {
            let (node, parent) = &self.steps[idx];
            path.push(node.clone());
            match parent {
                Some(p) => idx = *p,
                None => break,
            }
        }
        path.reverse();
        path
    }
}

// =============================================================================
// A*
// =============================================================================

/// Open-list entry for A*, ordered by `(f, g, node)`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct CostEntry {
    f: u32,
    g: u32,
    node: NodeId,
    parent: Option<usize>,
}

/// A* from `root` to `goal` with unit edge costs.
///
/// Ties on `f` go to the smaller `g`, then to the smaller node id. `f`
/// saturates, so `u32::MAX` can mark a dead end.
pub fn astar(
    graph: &GraphStore,
    root: &NodeId,
    goal: &NodeId,
    heuristic: &Heuristic,
) -> Result<SearchOutcome, SearchError> {
    let mut open = BinaryHeap::new();
    open.push(Reverse(CostEntry {
        f: heuristic.get(root)?,
        g: 0,
        node: root.clone(),
        parent: None,
    }));
    let mut closed = HashSet::new();
    let mut trail = Trail::default();
    let mut visited = Vec::new();

    while let Some(Reverse(entry)) = open.pop() {
        if !closed.insert(entry.node.clone()) {
            continue;
        }
        trace!("astar: pop {} f={} g={}", entry.node, entry.f, entry.g);
        visited.push(entry.node.clone());
        let idx = trail.record(entry.node.clone(), entry.parent);

        if entry.node == *goal {
            return Ok(SearchOutcome {
                visited,
                goal: Some(GoalPath {
                    path: trail.path_to(idx),
                    cost: entry.g,
                }),
            });
        }

        for child in graph.children_of(&entry.node) {
            if closed.contains(child) {
                continue;
            }
            let g = entry.g + 1;
            open.push(Reverse(CostEntry {
                f: g.saturating_add(heuristic.get(child)?),
                g,
                node: child.clone(),
                parent: Some(idx),
            }));
        }
    }

    Ok(SearchOutcome {
        visited,
        goal: None,
    })
}

// =============================================================================
// Best-First and Greedy
// =============================================================================

/// Open-list entry for the score-ordered searches, ordered by `(score, node)`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct ScoreEntry {
    score: u32,
    node: NodeId,
    parent: Option<usize>,
    depth: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Revisits {
    Never,
    Allowed,
}

/// Best-First search: lowest score first, each node expanded at most once.
pub fn best_first(
    graph: &GraphStore,
    root: &NodeId,
    goal: &NodeId,
    heuristic: &Heuristic,
) -> Result<SearchOutcome, SearchError> {
    score_first(graph, root, goal, heuristic, Revisits::Never)
}

/// Greedy search: lowest score first, with no memory of expanded nodes.
///
/// Terminates on acyclic graphs only.
pub fn greedy(
    graph: &GraphStore,
    root: &NodeId,
    goal: &NodeId,
    heuristic: &Heuristic,
) -> Result<SearchOutcome, SearchError> {
    score_first(graph, root, goal, heuristic, Revisits::Allowed)
}

fn score_first(
    graph: &GraphStore,
    root: &NodeId,
    goal: &NodeId,
    heuristic: &Heuristic,
    revisits: Revisits,
) -> Result<SearchOutcome, SearchError> {
    let mut open = BinaryHeap::new();
    open.push(Reverse(ScoreEntry {
        score: heuristic.get(root)?,
        node: root.clone(),
        parent: None,
        depth: 0,
    }));
    let mut closed = HashSet::new();
    let mut trail = Trail::default();
    let mut visited = Vec::new();

    while let Some(Reverse(entry)) = open.pop() {
        if revisits == Revisits::Never && !closed.insert(entry.node.clone()) {
            continue;
        }
        trace!("score_first: pop {} h={}", entry.node, entry.score);
        visited.push(entry.node.clone());
        let idx = trail.record(entry.node.clone(), entry.parent);

        if entry.node == *goal {
            return Ok(SearchOutcome {
                visited,
                goal: Some(GoalPath {
                    path: trail.path_to(idx),
                    cost: entry.depth,
                }),
            });
        }

        for child in graph.children_of(&entry.node) {
            if revisits == Revisits::Never && closed.contains(child) {
                continue;
            }
            open.push(Reverse(ScoreEntry {
                score: heuristic.get(child)?,
                node: child.clone(),
                parent: Some(idx),
                depth: entry.depth + 1,
            }));
        }
    }

    Ok(SearchOutcome {
        visited,
        goal: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(nodes: &[NodeId]) -> Vec<&str> {
        nodes.iter().map(NodeId::as_str).collect()
    }

    /// A -> {B, C}, B -> D, C -> D: D is reachable twice.
    fn diamond() -> (GraphStore, Heuristic) {
        let graph = GraphStore::from_edges([
            ("A", vec!["B", "C"]),
            ("B", vec!["D"]),
            ("C", vec!["D"]),
        ]);
        let h = Heuristic::from_pairs([("A", 3), ("B", 1), ("C", 2), ("D", 5)]);
        (graph, h)
    }

    #[test]
    fn test_astar_sample() {
        let outcome = astar(
            &GraphStore::sample(),
            &NodeId::from("A"),
            &NodeId::from("I"),
            &Heuristic::sample(),
        )
        .unwrap();
        assert_eq!(names(&outcome.visited), ["A", "C", "F", "B", "E", "D", "I"]);
        let goal = outcome.goal.unwrap();
        assert_eq!(names(&goal.path), ["A", "B", "D", "I"]);
        assert_eq!(goal.cost, 3);
    }

    #[test]
    fn test_astar_saturates_huge_estimates() {
        let h = Heuristic::from_pairs([
            ("A", 6),
            ("B", 5),
            ("C", 4),
            ("D", 3),
            ("E", u32::MAX),
            ("F", 3),
            ("G", 4),
            ("H", 1),
            ("I", 0),
        ]);
        let outcome = astar(&GraphStore::sample(), &NodeId::from("A"), &NodeId::from("I"), &h).unwrap();
        assert_eq!(names(&outcome.visited), ["A", "C", "F", "B", "D", "I"]);
        assert_eq!(outcome.goal.map(|g| g.cost), Some(3));
    }

    #[test]
    fn test_astar_expands_shared_child_once() {
        let (graph, h) = diamond();
        let outcome = astar(&graph, &NodeId::from("A"), &NodeId::from("X"), &h).unwrap();
        assert_eq!(names(&outcome.visited), ["A", "B", "C", "D"]);
        assert!(!outcome.found());
    }

    #[test]
    fn test_best_first_sample() {
        let outcome = best_first(
            &GraphStore::sample(),
            &NodeId::from("A"),
            &NodeId::from("I"),
            &Heuristic::sample(),
        )
        .unwrap();
        assert_eq!(
            names(&outcome.visited),
            ["A", "C", "F", "G", "B", "E", "D", "I"]
        );
        assert_eq!(names(&outcome.goal.unwrap().path), ["A", "B", "D", "I"]);
    }

    #[test]
    fn test_greedy_matches_best_first_on_a_tree() {
        let graph = GraphStore::sample();
        let h = Heuristic::sample();
        let (root, goal) = (NodeId::from("A"), NodeId::from("I"));
        assert_eq!(
            greedy(&graph, &root, &goal, &h).unwrap(),
            best_first(&graph, &root, &goal, &h).unwrap()
        );
    }

    #[test]
    fn test_greedy_revisits_shared_children() {
        let (graph, h) = diamond();
        let (root, goal) = (NodeId::from("A"), NodeId::from("X"));

        let greedy = greedy(&graph, &root, &goal, &h).unwrap();
        assert_eq!(names(&greedy.visited), ["A", "B", "C", "D", "D"]);
        assert!(!greedy.found());

        let best = best_first(&graph, &root, &goal, &h).unwrap();
        assert_eq!(names(&best.visited), ["A", "B", "C", "D"]);
        assert!(!best.found());
    }

    #[test]
    fn test_unreachable_goal_is_explicit() {
        let outcome = astar(
            &GraphStore::sample(),
            &NodeId::from("C"),
            &NodeId::from("I"),
            &Heuristic::sample(),
        )
        .unwrap();
        assert_eq!(outcome.goal, None);
        assert_eq!(names(&outcome.visited), ["C", "F", "G"]);
    }

    #[test]
    fn test_missing_heuristic_is_fatal() {
        let graph = GraphStore::sample();
        let h = Heuristic::from_pairs([("A", 1), ("B", 1)]);
        let err = astar(&graph, &NodeId::from("A"), &NodeId::from("I"), &h).unwrap_err();
        assert_eq!(err, SearchError::MissingHeuristic(NodeId::from("C")));

        let err = greedy(&graph, &NodeId::from("Q"), &NodeId::from("I"), &h).unwrap_err();
        assert_eq!(err, SearchError::MissingHeuristic(NodeId::from("Q")));
    }
}
