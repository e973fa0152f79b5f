//! Monte Carlo Tree Search with UCB1 selection.
//!
//! Each simulation runs four phases:
//! - Selection: descend from the root. While some child is unvisited, one of
//!   them is picked at random; once all are visited, the UCB1 maximum wins.
//! - Expansion: a leaf that is reached a second time gets its children from a
//!   [`ChildFactory`]. A leaf whose factory yields nothing is terminal.
//! - Simulation: a [`Playout`] scores the node the descent stopped at.
//! - Backpropagation: the reward is added along the path of child indices the
//!   descent recorded, root included. Nodes keep no parent links.
//!
//! The tree only grows. After the budget is spent, the most visited root child
//! is the answer.

use log::{debug, trace};

use crate::constants::{DEFAULT_SEED, N_SIMS, RANDOM_REWARD_MAX, REPORT_PERIOD, UCB_C};
use crate::error::SearchError;
use crate::graph::{GraphStore, NodeId};

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct MctsNode {
    pub name: NodeId,
    /// Number of simulations that passed through this node
    pub visits: u32,
    /// Sum of rewards from those simulations
    pub reward: f64,
    /// Children, empty until expanded
    pub children: Vec<MctsNode>,
    expanded: bool,
}

impl MctsNode {
    pub fn new(name: impl Into<NodeId>) -> Self {
        Self {
            name: name.into(),
            visits: 0,
            reward: 0.0,
            children: Vec::new(),
            expanded: false,
        }
    }

    /// Average reward, or 0 for an unvisited node.
    #[inline]
    pub fn mean_reward(&self) -> f64 {
        if self.visits > 0 {
            self.reward / self.visits as f64
        } else {
            0.0
        }
    }

    /// UCB1 score of this node as seen from a parent with `parent_visits`.
    ///
    /// Unvisited nodes score infinity.
    pub fn ucb1(&self, parent_visits: u32, c: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let visits = self.visits as f64;
        self.mean_reward() + c * ((parent_visits as f64).ln() / visits).sqrt()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Expanded but childless.
    pub fn is_terminal(&self) -> bool {
        self.expanded && self.children.is_empty()
    }

    /// Number of nodes in this subtree.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

/// Source of a node's children at expansion time.
pub trait ChildFactory {
    fn children(&self, name: &NodeId) -> Vec<NodeId>;
}

impl ChildFactory for GraphStore {
    fn children(&self, name: &NodeId) -> Vec<NodeId> {
        self.children_of(name).to_vec()
    }
}

/// Scores a node reached by the descent.
pub trait Playout {
    fn simulate(&mut self, node: &NodeId, rng: &mut fastrand::Rng) -> f64;
}

/// Reward 1 at the goal and 0 anywhere else.
#[derive(Debug, Clone)]
pub struct GoalReward {
    pub goal: NodeId,
}

impl GoalReward {
    pub fn new(goal: impl Into<NodeId>) -> Self {
        Self { goal: goal.into() }
    }
}

impl Playout for GoalReward {
    fn simulate(&mut self, node: &NodeId, _rng: &mut fastrand::Rng) -> f64 {
        if *node == self.goal { 1.0 } else { 0.0 }
    }
}

/// Uniform integer reward in `0..max`, ignoring the node.
#[derive(Debug, Clone)]
pub struct RandomReward {
    pub max: u32,
}

impl Default for RandomReward {
    fn default() -> Self {
        Self {
            max: RANDOM_REWARD_MAX,
        }
    }
}

impl Playout for RandomReward {
    fn simulate(&mut self, _node: &NodeId, rng: &mut fastrand::Rng) -> f64 {
        rng.u32(0..self.max.max(1)) as f64
    }
}

/// Search parameters.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of simulations to run
    pub simulations: u32,
    /// UCB1 exploration constant
    pub exploration: f64,
    /// Seed for the search RNG
    pub seed: u64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            simulations: N_SIMS,
            exploration: UCB_C,
            seed: DEFAULT_SEED,
        }
    }
}

/// Give `node` its children, once.
pub fn expand<F: ChildFactory + ?Sized>(node: &mut MctsNode, factory: &F) {
    if node.expanded {
        return;
    }
    node.expanded = true;
    node.children = factory
        .children(&node.name)
        .into_iter()
        .map(MctsNode::new)
        .collect();
    trace!("mcts: expanded {} into {} children", node.name, node.children.len());
}

/// Pick the child to descend into.
///
/// Unvisited children come first, chosen uniformly at random. Otherwise the
/// first child with the highest UCB1 score.
fn select_child(node: &MctsNode, rng: &mut fastrand::Rng, c: f64) -> usize {
    let unvisited: Vec<usize> = node
        .children
        .iter()
        .enumerate()
        .filter(|(_, child)| child.visits == 0)
        .map(|(i, _)| i)
        .collect();
    if !unvisited.is_empty() {
        return unvisited[rng.usize(..unvisited.len())];
    }

    let mut best = 0;
    let mut best_score = f64::NEG_INFINITY;
    for (i, child) in node.children.iter().enumerate() {
        let score = child.ucb1(node.visits, c);
        if score > best_score {
            best = i;
            best_score = score;
        }
    }
    best
}

/// Descend to the node to simulate, expanding on the way.
///
/// Returns the path of child indices from the root.
fn tree_descend<F: ChildFactory + ?Sized>(
    tree: &mut MctsNode,
    factory: &F,
    rng: &mut fastrand::Rng,
    c: f64,
) -> Vec<usize> {
    let mut path = Vec::new();
    let mut node = tree;

    loop {
        if node.children.is_empty() {
            // First visit is simulated as is; expand on the second
            if node.visits > 0 {
                expand(node, factory);
            }
            if node.children.is_empty() {
                break;
            }
        }

        let child_idx = select_child(node, rng, c);
        path.push(child_idx);
        node = &mut node.children[child_idx];
    }

    path
}

/// Add one visit and `reward` to the root and every node on `path`.
fn tree_update(tree: &mut MctsNode, path: &[usize], reward: f64) {
    tree.visits += 1;
    tree.reward += reward;

    let mut node = tree;
    for &idx in path {
        node = &mut node.children[idx];
        node.visits += 1;
        node.reward += reward;
    }
}

/// Name of the node at the end of `path`.
fn leaf_name<'t>(tree: &'t MctsNode, path: &[usize]) -> &'t NodeId {
    &path
        .iter()
        .fold(tree, |node, &idx| &node.children[idx])
        .name
}

/// Run `config.simulations` simulations from `root`, mutating its subtree.
///
/// Returns the name of the most visited root child, or `None` if the root is
/// terminal.
pub fn tree_search<F, P>(
    root: &mut MctsNode,
    factory: &F,
    playout: &mut P,
    config: &MctsConfig,
) -> Result<Option<NodeId>, SearchError>
where
    F: ChildFactory + ?Sized,
    P: Playout + ?Sized,
{
    if config.simulations == 0 {
        return Err(SearchError::ZeroSimulations);
    }
    let mut rng = fastrand::Rng::with_seed(config.seed);

    for i in 0..config.simulations {
        let path = tree_descend(root, factory, &mut rng, config.exploration);
        let reward = playout.simulate(leaf_name(root, &path), &mut rng);
        tree_update(root, &path, reward);

        if (i + 1) % REPORT_PERIOD == 0 {
            debug!(
                "mcts: {} simulations, {} nodes, root mean {:.3}",
                i + 1,
                root.size(),
                root.mean_reward()
            );
        }
    }

    Ok(best_child(root).map(|child| child.name.clone()))
}

/// The most visited child. Ties go to the earlier child.
pub fn best_child(root: &MctsNode) -> Option<&MctsNode> {
    root.children
        .iter()
        .reduce(|best, child| if child.visits > best.visits { child } else { best })
}

/// Visit statistics for one root child.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildStats {
    pub name: NodeId,
    pub visits: u32,
    pub mean_reward: f64,
}

/// Statistics for each of the root's children, in child order.
pub fn child_stats(root: &MctsNode) -> Vec<ChildStats> {
    root.children
        .iter()
        .map(|child| ChildStats {
            name: child.name.clone(),
            visits: child.visits,
            mean_reward: child.mean_reward(),
        })
        .collect()
}
