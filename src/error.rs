//! Error type shared by the search engines.

use thiserror::Error;

use crate::graph::NodeId;

/// Errors that can occur during a search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("no heuristic entry for node {0}")]
    MissingHeuristic(NodeId),

    #[error("MCTS needs at least one simulation")]
    ZeroSimulations,

    #[error("illegal move: cell {0} is occupied or off the board")]
    IllegalMove(usize),
}
