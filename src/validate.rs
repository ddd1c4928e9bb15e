//! Consistency checks recomputed from the raw links. Every check consumes a traversal of the
//! tree as a sequence of handles, so the same code serves parent-linked and threaded trees.

use crate::arena::{Arena, Handle};
use crate::error::ValidationError;
use crate::node::{BinaryNode, HeightBalanced, Link, Side};
use std::cmp;

/// Checks that keys strictly increase along an in-order traversal and returns the number of
/// nodes visited.
pub fn check_order<N, I>(arena: &Arena<N>, inorder: I) -> Result<usize, ValidationError>
where
    N: BinaryNode,
    N::Key: Ord,
    I: Iterator<Item = Handle>,
{
    let mut prev: Option<Handle> = None;
    let mut count = 0;
    for handle in inorder {
        if let Some(prev) = prev {
            if arena[prev].key() >= arena[handle].key() {
                return Err(ValidationError::Unordered {
                    node: handle.index(),
                });
            }
        }
        prev = Some(handle);
        count += 1;
    }
    Ok(count)
}

pub fn check_count<N>(arena: &Arena<N>, reachable: usize) -> Result<(), ValidationError> {
    if reachable != arena.len() {
        return Err(ValidationError::CountMismatch {
            reachable,
            stored: arena.len(),
        });
    }
    Ok(())
}

/// Checks that every child points back at its parent and that the root has no parent.
pub fn check_parents<N, I>(arena: &Arena<N>, root: Link, nodes: I) -> Result<(), ValidationError>
where
    N: BinaryNode,
    I: Iterator<Item = Handle>,
{
    if let Some(root) = root {
        if arena[root].parent().is_some() {
            return Err(ValidationError::ParentMismatch { node: root.index() });
        }
    }
    for handle in nodes {
        for side in &[Side::Left, Side::Right] {
            if let Some(child) = arena[handle].child(*side) {
                if arena[child].parent() != Some(handle) {
                    return Err(ValidationError::ParentMismatch {
                        node: child.index(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Recomputes subtree heights along a post-order traversal and compares the resulting balance
/// factors with the stored ones.
pub fn check_heights<N, I>(arena: &Arena<N>, postorder: I) -> Result<(), ValidationError>
where
    N: HeightBalanced,
    I: Iterator<Item = Handle>,
{
    let mut heights = vec![0usize; arena.slots()];
    for handle in postorder {
        let node = &arena[handle];
        let left = node.child(Side::Left).map_or(0, |child| heights[child.index()]);
        let right = node.child(Side::Right).map_or(0, |child| heights[child.index()]);
        let computed = right as isize - left as isize;
        if computed.abs() > 1 {
            return Err(ValidationError::Unbalanced {
                node: handle.index(),
                balance: computed,
            });
        }
        if computed != node.balance() as isize {
            return Err(ValidationError::BalanceMismatch {
                node: handle.index(),
                stored: node.balance(),
                computed,
            });
        }
        heights[handle.index()] = cmp::max(left, right) + 1;
    }
    Ok(())
}
