//! Structural diagnostics reported by `validate`.

use thiserror::Error;

/// A broken tree invariant. Nodes are identified by their arena slot index.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ValidationError {
    #[error("keys out of order at node {node}")]
    Unordered { node: usize },
    #[error("parent link of node {node} does not match its parent")]
    ParentMismatch { node: usize },
    #[error("node {node} stores balance {stored} but its subtrees give {computed}")]
    BalanceMismatch {
        node: usize,
        stored: i8,
        computed: isize,
    },
    #[error("node {node} has balance {balance}, outside -1..=1")]
    Unbalanced { node: usize, balance: isize },
    #[error("root node {node} is red")]
    RedRoot { node: usize },
    #[error("red node {node} has a red child")]
    RedViolation { node: usize },
    #[error("subtrees of node {node} have black heights {left} and {right}")]
    BlackHeightMismatch {
        node: usize,
        left: usize,
        right: usize,
    },
    #[error("reached {reachable} nodes from the root but {stored} are allocated")]
    CountMismatch { reachable: usize, stored: usize },
}
