//! Dojo-Search: classic tree and game-tree search algorithms.
//!
//! Every engine borrows its input (a [`graph::GraphStore`], a
//! [`game_tree::ValueNode`] or an [`mcts::MctsNode`]) and runs on its own; no
//! engine depends on another's output.
//!
//! ## Modules
//!
//! - [`constants`] - Sample data and search parameters
//! - [`graph`] - Graph store, node ids and heuristic tables
//! - [`traversal`] - DFS, BFS, uniform-cost search, iterative deepening
//! - [`informed`] - A*, Best-First and Greedy search
//! - [`game_tree`] - Minimax and alpha-beta pruning
//! - [`mcts`] - Monte Carlo Tree Search with UCB1
//! - [`tictactoe`] - Tic-tac-toe board and perfect-play minimax
//! - [`error`] - Error type
//!
//! ## Example
//!
//! ```
//! use dojo_search::graph::{GraphStore, Heuristic, NodeId};
//! use dojo_search::informed::astar;
//! use dojo_search::traversal::dfs;
//!
//! let graph = GraphStore::sample();
//! let order: Vec<String> = dfs(&graph, NodeId::from("A")).map(|n| n.to_string()).collect();
//! assert_eq!(order, ["A", "B", "D", "H", "I", "E", "C", "F", "G"]);
//!
//! let outcome = astar(&graph, &NodeId::from("A"), &NodeId::from("I"), &Heuristic::sample()).unwrap();
//! assert_eq!(outcome.goal.map(|g| g.cost), Some(3));
//! ```

pub mod constants;
pub mod error;
pub mod game_tree;
pub mod graph;
pub mod informed;
pub mod mcts;
pub mod tictactoe;
pub mod traversal;
