//! Property tests over randomly generated graphs and game trees.

use std::collections::HashSet;

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

use dojo_search::game_tree::{alphabeta_stats, minimax_stats, ValueNode};
use dojo_search::graph::{GraphStore, NodeId};
use dojo_search::mcts::{tree_search, MctsConfig, MctsNode, RandomReward};
use dojo_search::traversal::{bfs, dfs, iddfs, ucs};

const MAX_NODES: usize = 16;

fn name(i: usize) -> NodeId {
    NodeId::new(format!("n{i}"))
}

fn index(id: &NodeId) -> usize {
    id.as_str()[1..].parse().unwrap()
}

// =============================================================================
// Generators
// =============================================================================

/// A tree rooted at `n0`: node `i > 0` hangs off some node `< i`.
#[derive(Clone, Debug)]
struct RandomTree {
    parents: Vec<usize>,
}

impl Arbitrary for RandomTree {
    fn arbitrary(g: &mut Gen) -> Self {
        let n = usize::arbitrary(g) % MAX_NODES + 1;
        let parents = (0..n)
            .map(|i| if i == 0 { 0 } else { usize::arbitrary(g) % i })
            .collect();
        Self { parents }
    }
}

impl RandomTree {
    fn len(&self) -> usize {
        self.parents.len()
    }

    fn children(&self) -> Vec<Vec<usize>> {
        let mut kids = vec![Vec::new(); self.len()];
        for i in 1..self.len() {
            kids[self.parents[i]].push(i);
        }
        kids
    }

    fn graph(&self) -> GraphStore {
        GraphStore::from_edges(
            self.children()
                .into_iter()
                .enumerate()
                .map(|(i, kids)| (name(i), kids.into_iter().map(name).collect::<Vec<NodeId>>())),
        )
    }

    fn depth(&self, mut i: usize) -> usize {
        let mut depth = 0;
        while i != 0 {
            i = self.parents[i];
            depth += 1;
        }
        depth
    }

    fn preorder(&self) -> Vec<NodeId> {
        fn walk(i: usize, kids: &[Vec<usize>], out: &mut Vec<NodeId>) {
            out.push(name(i));
            for &k in &kids[i] {
                walk(k, kids, out);
            }
        }
        let mut out = Vec::new();
        walk(0, &self.children(), &mut out);
        out
    }
}

/// A DAG where edges only point from lower to higher indices.
#[derive(Clone, Debug)]
struct RandomDag {
    children: Vec<Vec<usize>>,
}

impl Arbitrary for RandomDag {
    fn arbitrary(g: &mut Gen) -> Self {
        let n = usize::arbitrary(g) % 10 + 1;
        let children = (0..n)
            .map(|i| ((i + 1)..n).filter(|_| u8::arbitrary(g) % 3 == 0).collect::<Vec<usize>>())
            .collect();
        Self { children }
    }
}

impl RandomDag {
    fn graph(&self) -> GraphStore {
        GraphStore::from_edges(
            self.children
                .iter()
                .enumerate()
                .map(|(i, kids)| (name(i), kids.iter().copied().map(name).collect::<Vec<NodeId>>())),
        )
    }

    fn reachable(&self) -> HashSet<usize> {
        let mut seen = HashSet::new();
        let mut stack = vec![0];
        while let Some(i) = stack.pop() {
            if seen.insert(i) {
                stack.extend(self.children[i].iter().copied());
            }
        }
        seen
    }
}

/// A game tree with small integer leaves.
#[derive(Clone, Debug)]
struct RandomGameTree(ValueNode);

impl Arbitrary for RandomGameTree {
    fn arbitrary(g: &mut Gen) -> Self {
        fn build(g: &mut Gen, depth: u8) -> ValueNode {
            let branching = if depth == 0 { 0 } else { u8::arbitrary(g) % 4 };
            if branching == 0 {
                return ValueNode::leaf(i8::arbitrary(g) as f64);
            }
            ValueNode::new(0.0, (0..branching).map(|_| build(g, depth - 1)).collect())
        }
        Self(build(g, 5))
    }
}

// =============================================================================
// Traversal properties
// =============================================================================

#[quickcheck]
fn dfs_visits_tree_once_in_preorder(tree: RandomTree) -> bool {
    let graph = tree.graph();
    dfs(&graph, name(0)).collect::<Vec<_>>() == tree.preorder()
}

#[quickcheck]
fn guarded_dfs_visits_dag_once(dag: RandomDag) -> bool {
    let graph = dag.graph();
    let visited: Vec<usize> = dfs(&graph, name(0)).with_cycle_guard().map(|n| index(&n)).collect();
    let unique: HashSet<usize> = visited.iter().copied().collect();
    unique.len() == visited.len() && unique == dag.reachable()
}

#[quickcheck]
fn bfs_depth_never_decreases(tree: RandomTree) -> bool {
    let graph = tree.graph();
    let depths: Vec<usize> = bfs(&graph, name(0)).map(|n| tree.depth(index(&n))).collect();
    depths.len() == tree.len() && depths.windows(2).all(|w| w[0] <= w[1])
}

#[quickcheck]
fn ucs_matches_bfs_on_unit_costs(dag: RandomDag) -> bool {
    let graph = dag.graph();
    bfs(&graph, name(0)).collect::<Vec<_>>() == ucs(&graph, name(0)).collect::<Vec<_>>()
}

#[quickcheck]
fn iddfs_finds_target_at_its_depth(tree: RandomTree, pick: usize) -> bool {
    let graph = tree.graph();
    let target = pick % tree.len();
    let goal = name(target);
    let outcome = iddfs(&graph, &name(0), tree.len(), |n| *n == goal);
    outcome.found == Some((name(target), tree.depth(target)))
}

// =============================================================================
// Game-tree properties
// =============================================================================

#[quickcheck]
fn alphabeta_agrees_with_minimax(tree: RandomGameTree, maximizing: bool) -> bool {
    let full = minimax_stats(&tree.0, maximizing);
    let pruned = alphabeta_stats(&tree.0, f64::NEG_INFINITY, f64::INFINITY, maximizing);
    full.value == pruned.value
}

#[quickcheck]
fn alphabeta_never_visits_more(tree: RandomGameTree, maximizing: bool) -> bool {
    let full = minimax_stats(&tree.0, maximizing);
    let pruned = alphabeta_stats(&tree.0, f64::NEG_INFINITY, f64::INFINITY, maximizing);
    full.nodes_visited == tree.0.size()
        && pruned.nodes_visited <= full.nodes_visited
        && (pruned.nodes_visited == full.nodes_visited) == (pruned.cutoffs == 0)
}

// =============================================================================
// MCTS properties
// =============================================================================

#[quickcheck]
fn mcts_root_visits_equal_budget(tree: RandomTree, budget: u8, seed: u64) -> bool {
    let graph = tree.graph();
    let config = MctsConfig {
        simulations: budget as u32 + 1,
        seed,
        ..MctsConfig::default()
    };
    let mut root = MctsNode::new(name(0));
    if tree_search(&mut root, &graph, &mut RandomReward::default(), &config).is_err() {
        return false;
    }
    let child_visits: u32 = root.children.iter().map(|c| c.visits).sum();
    let expected_children = if root.children.is_empty() { 0 } else { config.simulations - 1 };
    root.visits == config.simulations && child_visits == expected_children
}
