//! The graph store and heuristic table shared by the graph searches.
//!
//! A [`GraphStore`] is built once and never mutated afterwards. Every engine
//! borrows it, so there is no process-wide tree.

use std::collections::HashMap;
use std::fmt;

use crate::constants::{SAMPLE_EDGES, SAMPLE_HEURISTIC};
use crate::error::SearchError;

/// Opaque identifier of a vertex.
///
/// Ordering is the ordering of the underlying name. A* and the heuristic
/// searches use it as their last tie-breaker.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable mapping from a node to its ordered children.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    children: HashMap<NodeId, Vec<NodeId>>,
}

impl GraphStore {
    /// Build a store from `(parent, children)` rows.
    ///
    /// A parent listed twice keeps the last row.
    pub fn from_edges<P, C, I>(rows: I) -> Self
    where
        P: Into<NodeId>,
        C: Into<NodeId>,
        I: IntoIterator<Item = (P, Vec<C>)>,
    {
        let children = rows
            .into_iter()
            .map(|(parent, kids)| (parent.into(), kids.into_iter().map(Into::into).collect()))
            .collect();
        Self { children }
    }

    /// The nine-node sample tree from [`SAMPLE_EDGES`].
    pub fn sample() -> Self {
        Self::from_edges(
            SAMPLE_EDGES
                .iter()
                .map(|&(parent, kids)| (parent, kids.to_vec())),
        )
    }

    /// Ordered children of `id`.
    ///
    /// Unknown nodes have no children. That is not an error.
    pub fn children_of(&self, id: &NodeId) -> &[NodeId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `id` appears in the store, as a parent or as a child.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.children.contains_key(id) || self.children.values().any(|kids| kids.contains(id))
    }

    /// Number of rows in the store.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Lookup table of estimated costs, one entry per node.
///
/// A* reads the value as cost-to-goal. Best-First and Greedy read it as a
/// desirability score where lower is better.
#[derive(Debug, Clone, Default)]
pub struct Heuristic {
    values: HashMap<NodeId, u32>,
}

impl Heuristic {
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<NodeId>,
        I: IntoIterator<Item = (K, u32)>,
    {
        Self {
            values: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// The sample table from [`SAMPLE_HEURISTIC`].
    pub fn sample() -> Self {
        Self::from_pairs(SAMPLE_HEURISTIC.iter().copied())
    }

    /// Estimated value for `id`. A missing entry is fatal to the caller.
    pub fn get(&self, id: &NodeId) -> Result<u32, SearchError> {
        self.values
            .get(id)
            .copied()
            .ok_or_else(|| SearchError::MissingHeuristic(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_children() {
        let graph = GraphStore::sample();
        let kids: Vec<&str> = graph
            .children_of(&NodeId::from("A"))
            .iter()
            .map(NodeId::as_str)
            .collect();
        assert_eq!(kids, ["B", "C"]);
        assert_eq!(graph.len(), 9);
    }

    #[test]
    fn test_absent_and_empty_are_equivalent() {
        let graph = GraphStore::sample();
        assert!(graph.children_of(&NodeId::from("E")).is_empty());
        assert!(graph.children_of(&NodeId::from("Z")).is_empty());
        assert!(graph.contains(&NodeId::from("E")));
        assert!(!graph.contains(&NodeId::from("Z")));
    }

    #[test]
    fn test_heuristic_lookup() {
        let h = Heuristic::sample();
        assert_eq!(h.get(&NodeId::from("A")), Ok(6));
        assert_eq!(
            h.get(&NodeId::from("Z")),
            Err(SearchError::MissingHeuristic(NodeId::from("Z")))
        );
    }

    #[test]
    fn test_node_ordering_is_by_name() {
        assert!(NodeId::from("B") < NodeId::from("C"));
        assert_eq!(NodeId::new("H").to_string(), "H");
    }
}
