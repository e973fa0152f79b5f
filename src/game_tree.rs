//! Minimax and alpha-beta search over explicit value trees.
//!
//! A [`ValueNode`] owns its children outright. Leaves carry the value that
//! matters; values stored on interior nodes are ignored by the search.
//!
//! Both searches run on an explicit frame stack instead of recursion, so a
//! very deep tree cannot overflow the call stack. Children are visited in
//! order, exactly as the recursive formulation would visit them.

use log::trace;

/// A node of a game tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueNode {
    pub value: f64,
    pub children: Vec<ValueNode>,
}

impl ValueNode {
    pub fn leaf(value: f64) -> Self {
        Self {
            value,
            children: Vec::new(),
        }
    }

    pub fn new(value: f64, children: Vec<ValueNode>) -> Self {
        Self { value, children }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree.
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

/// The six-node sample tree:
///
/// ```text
///        3
///      /   \
///     5     2
///    / \    |
///   9   8   1
/// ```
///
/// With the maximizing player at the root its value is `max(min(9, 8), min(1)) = 8`.
pub fn sample_tree() -> ValueNode {
    ValueNode::new(
        3.0,
        vec![
            ValueNode::new(5.0, vec![ValueNode::leaf(9.0), ValueNode::leaf(8.0)]),
            ValueNode::new(2.0, vec![ValueNode::leaf(1.0)]),
        ],
    )
}

/// Value of a search plus how much of the tree it touched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameTreeStats {
    pub value: f64,
    /// Nodes entered, the root included.
    pub nodes_visited: usize,
    /// Cutoffs that skipped at least one sibling.
    pub cutoffs: usize,
}

/// Minimax value of `node`, with `maximizing` choosing who moves first.
pub fn minimax(node: &ValueNode, maximizing: bool) -> f64 {
    minimax_stats(node, maximizing).value
}

/// Alpha-beta value of `node` inside the `(alpha, beta)` window.
///
/// Called with `(-inf, +inf)` this always agrees with [`minimax`].
pub fn alphabeta(node: &ValueNode, alpha: f64, beta: f64, maximizing: bool) -> f64 {
    alphabeta_stats(node, alpha, beta, maximizing).value
}

pub fn minimax_stats(node: &ValueNode, maximizing: bool) -> GameTreeStats {
    evaluate(node, maximizing, None)
}

pub fn alphabeta_stats(node: &ValueNode, alpha: f64, beta: f64, maximizing: bool) -> GameTreeStats {
    evaluate(node, maximizing, Some((alpha, beta)))
}

struct Frame<'t> {
    node: &'t ValueNode,
    maximizing: bool,
    alpha: f64,
    beta: f64,
    value: f64,
    next: usize,
}

impl<'t> Frame<'t> {
    fn new(node: &'t ValueNode, maximizing: bool, alpha: f64, beta: f64) -> Self {
        Self {
            node,
            maximizing,
            alpha,
            beta,
            value: if maximizing { f64::NEG_INFINITY } else { f64::INFINITY },
            next: 0,
        }
    }

    /// Fold a finished child's value into this frame. Returns true on a cutoff.
    fn absorb(&mut self, child_value: f64, prune: bool) -> bool {
        if self.maximizing {
            self.value = self.value.max(child_value);
            self.alpha = self.alpha.max(self.value);
        } else {
            self.value = self.value.min(child_value);
            self.beta = self.beta.min(self.value);
        }
        prune && self.alpha >= self.beta
    }
}

/// Shared engine. `window` is `None` for plain minimax.
fn evaluate(root: &ValueNode, maximizing: bool, window: Option<(f64, f64)>) -> GameTreeStats {
    let prune = window.is_some();
    let (alpha, beta) = window.unwrap_or((f64::NEG_INFINITY, f64::INFINITY));
    let mut stats = GameTreeStats {
        value: root.value,
        nodes_visited: 1,
        cutoffs: 0,
    };

    let mut stack = vec![Frame::new(root, maximizing, alpha, beta)];
    let mut returned: Option<f64> = None;

    while let Some(frame) = stack.last_mut() {
        if let Some(child_value) = returned.take() {
            if frame.absorb(child_value, prune) {
                let skipped = frame.node.children.len() - frame.next;
                if skipped > 0 {
                    trace!(
                        "alphabeta: cutoff at alpha={} beta={}, {skipped} sibling(s) skipped",
                        frame.alpha,
                        frame.beta
                    );
                    stats.cutoffs += 1;
                }
                frame.next = frame.node.children.len();
            }
        }

        if frame.node.is_leaf() {
            returned = Some(frame.node.value);
            stack.pop();
            continue;
        }

        let node = frame.node;
        if frame.next < node.children.len() {
            let child = Frame::new(&node.children[frame.next], !frame.maximizing, frame.alpha, frame.beta);
            frame.next += 1;
            stack.push(child);
            stats.nodes_visited += 1;
        } else {
            returned = Some(frame.value);
            stack.pop();
        }
    }

    if let Some(value) = returned {
        stats.value = value;
    }
    stats
}
