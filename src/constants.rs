//! Constants for the sample data set and search parameters.
//!
//! The sample graph is a strict tree rooted at `A`:
//!
//! ```text
//!         A
//!       /   \
//!      B     C
//!     / \   / \
//!    D   E F   G
//!   / \
//!  H   I
//! ```
//!
//! The sample tables back `GraphStore::sample` and `Heuristic::sample`. The
//! search parameters are the defaults of `MctsConfig` and the CLI.

// =============================================================================
// Sample Graph
// =============================================================================

/// Root of the sample tree.
pub const SAMPLE_ROOT: &str = "A";

/// Goal node used by the informed searches and the goal-reward playout.
pub const SAMPLE_GOAL: &str = "I";

/// Parent to ordered children. Nodes without an entry are leaves.
pub const SAMPLE_EDGES: &[(&str, &[&str])] = &[
    ("A", &["B", "C"]),
    ("B", &["D", "E"]),
    ("C", &["F", "G"]),
    ("D", &["H", "I"]),
    ("E", &[]),
    ("F", &[]),
    ("G", &[]),
    ("H", &[]),
    ("I", &[]),
];

/// Estimated cost to reach [`SAMPLE_GOAL`] from each node.
pub const SAMPLE_HEURISTIC: &[(&str, u32)] = &[
    ("A", 6),
    ("B", 5),
    ("C", 4),
    ("D", 3),
    ("E", 2),
    ("F", 3),
    ("G", 4),
    ("H", 1),
    ("I", 0),
];

// =============================================================================
// Uninformed Search
// =============================================================================

/// Default depth limit for iterative deepening.
pub const DEFAULT_DEPTH_LIMIT: usize = 3;

// =============================================================================
// MCTS Parameters
// =============================================================================

/// Progress report period (number of simulations between debug lines).
pub const REPORT_PERIOD: u32 = 200;

/// UCB1 exploration constant.
pub const UCB_C: f64 = 1.4;

/// Default number of simulations per search.
pub const N_SIMS: u32 = 1000;

/// Default seed for the search RNG.
pub const DEFAULT_SEED: u64 = 42;

/// Upper bound (exclusive) of the random playout reward.
pub const RANDOM_REWARD_MAX: u32 = 10;

// =============================================================================
// Tic-Tac-Toe
// =============================================================================

/// Cells on the board.
pub const TTT_CELLS: usize = 9;

/// The eight winning lines, as cell indices.
pub const TTT_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];
