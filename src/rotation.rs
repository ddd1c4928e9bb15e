//! Rotation primitives shared by every tree flavor.
//!
//! `rotate(p, Side::Right)` is the classic right rotation: the left child of `p` rises and `p`
//! becomes its right child. Every function returns the new subtree root, which the caller must
//! place in the slot `p` used to occupy (see `splice`). Parent links are maintained through
//! `BinaryNode::set_parent`, which is a no-op for parentless nodes.

use crate::arena::{Arena, Handle};
use crate::node::{BinaryNode, HeightBalanced, Link, Side};
use log::trace;
use std::cmp;

pub fn rotate<N: BinaryNode>(arena: &mut Arena<N>, p: Handle, side: Side) -> Handle {
    let rising = side.opposite();
    let q = arena[p]
        .child(rising)
        .expect("Expected a child on the rising side of the rotation.");
    let inner = arena[q].child(side);
    let parent = arena[p].parent();

    arena[p].set_child(rising, inner);
    if let Some(inner) = inner {
        arena[inner].set_parent(Some(p));
    }
    arena[q].set_child(side, Some(p));
    arena[q].set_parent(parent);
    arena[p].set_parent(Some(q));
    q
}

/// Rotates the child of `p` on `side.opposite()` away from `side`, then rotates `p` towards
/// `side`. The grandchild ends up as the subtree root.
pub fn double_rotate<N: BinaryNode>(arena: &mut Arena<N>, p: Handle, side: Side) -> Handle {
    let rising = side.opposite();
    let child = arena[p]
        .child(rising)
        .expect("Expected a child on the rising side of the rotation.");
    let raised = rotate(arena, child, rising);
    arena[p].set_child(rising, Some(raised));
    rotate(arena, p, side)
}

/// A single rotation that also recomputes the balance factors of both moved nodes.
pub fn rotate_balanced<N: HeightBalanced>(arena: &mut Arena<N>, p: Handle, side: Side) -> Handle {
    let q = rotate(arena, p, side);
    let p_balance = arena[p].balance();
    let q_balance = arena[q].balance();
    let (new_p, new_q) = match side {
        Side::Right => {
            let new_p = p_balance + 1 - cmp::min(q_balance, 0);
            (new_p, q_balance + 1 + cmp::max(new_p, 0))
        },
        Side::Left => {
            let new_p = p_balance - 1 - cmp::max(q_balance, 0);
            (new_p, q_balance - 1 + cmp::min(new_p, 0))
        },
    };
    arena[p].set_balance(new_p);
    arena[q].set_balance(new_q);
    trace!(
        "rotated {:?} at {:?}: balances {} -> {}, {} -> {}",
        side,
        p,
        p_balance,
        new_p,
        q_balance,
        new_q,
    );
    q
}

pub fn double_rotate_balanced<N: HeightBalanced>(
    arena: &mut Arena<N>,
    p: Handle,
    side: Side,
) -> Handle {
    let rising = side.opposite();
    let child = arena[p]
        .child(rising)
        .expect("Expected a child on the rising side of the rotation.");
    let raised = rotate_balanced(arena, child, rising);
    arena[p].set_child(rising, Some(raised));
    rotate_balanced(arena, p, side)
}

/// Restores a node whose balance factor is +-2 with one single or double rotation and returns
/// the new subtree root. A double rotation is used when the child on the heavy side leans the
/// other way.
pub fn rebalance<N: HeightBalanced>(arena: &mut Arena<N>, p: Handle) -> Handle {
    let heavy = if arena[p].balance() < 0 {
        Side::Left
    } else {
        Side::Right
    };
    let child = arena[p]
        .child(heavy)
        .expect("Expected a child on the heavy side.");
    if arena[child].balance() == -heavy.sign() {
        double_rotate_balanced(arena, p, heavy.opposite())
    } else {
        rotate_balanced(arena, p, heavy.opposite())
    }
}

/// Replaces `old` with `new` in the child slot of `parent`, or at the root when there is no
/// parent.
pub fn splice<N: BinaryNode>(
    arena: &mut Arena<N>,
    root: &mut Link,
    parent: Link,
    old: Handle,
    new: Link,
) {
    match parent {
        None => *root = new,
        Some(parent) => {
            let side = side_of(arena, parent, old);
            arena[parent].set_child(side, new);
        },
    }
}

/// Returns which child slot of `parent` holds `child`.
pub fn side_of<N: BinaryNode>(arena: &Arena<N>, parent: Handle, child: Handle) -> Side {
    if arena[parent].child(Side::Left) == Some(child) {
        Side::Left
    } else {
        Side::Right
    }
}

#[cfg(test)]
mod tests {
    use super::{double_rotate, rebalance, rotate, rotate_balanced, splice};
    use crate::arena::{Arena, Handle};
    use crate::node::{BinaryNode, HeightBalanced, Link, Side};

    struct TestNode {
        key: u32,
        balance: i8,
        left: Link,
        right: Link,
        parent: Link,
    }

    impl BinaryNode for TestNode {
        type Key = u32;

        fn key(&self) -> &u32 {
            &self.key
        }

        fn child(&self, side: Side) -> Link {
            match side {
                Side::Left => self.left,
                Side::Right => self.right,
            }
        }

        fn set_child(&mut self, side: Side, link: Link) {
            match side {
                Side::Left => self.left = link,
                Side::Right => self.right = link,
            }
        }

        fn parent(&self) -> Link {
            self.parent
        }

        fn set_parent(&mut self, parent: Link) {
            self.parent = parent;
        }
    }

    impl HeightBalanced for TestNode {
        fn balance(&self) -> i8 {
            self.balance
        }

        fn set_balance(&mut self, balance: i8) {
            self.balance = balance;
        }
    }

    fn node(arena: &mut Arena<TestNode>, key: u32, balance: i8) -> Handle {
        arena.allocate(TestNode {
            key,
            balance,
            left: None,
            right: None,
            parent: None,
        })
    }

    fn link(arena: &mut Arena<TestNode>, parent: Handle, side: Side, child: Handle) {
        arena[parent].set_child(side, Some(child));
        arena[child].set_parent(Some(parent));
    }

    fn keys_in_order(arena: &Arena<TestNode>, link: Link, out: &mut Vec<u32>) {
        if let Some(handle) = link {
            keys_in_order(arena, arena[handle].left, out);
            out.push(arena[handle].key);
            keys_in_order(arena, arena[handle].right, out);
        }
    }

    #[test]
    fn test_rotate_right_left_chain() {
        let mut arena = Arena::new();
        let a = node(&mut arena, 3, -2);
        let b = node(&mut arena, 2, -1);
        let c = node(&mut arena, 1, 0);
        link(&mut arena, a, Side::Left, b);
        link(&mut arena, b, Side::Left, c);

        let root = rotate_balanced(&mut arena, a, Side::Right);
        assert_eq!(root, b);
        assert_eq!(arena[b].left, Some(c));
        assert_eq!(arena[b].right, Some(a));
        assert_eq!(arena[b].parent, None);
        assert_eq!(arena[a].parent, Some(b));
        assert_eq!(arena[a].balance, 0);
        assert_eq!(arena[b].balance, 0);
    }

    #[test]
    fn test_rotate_moves_inner_subtree() {
        let mut arena = Arena::new();
        let p = node(&mut arena, 1, 0);
        let q = node(&mut arena, 3, 0);
        let inner = node(&mut arena, 2, 0);
        link(&mut arena, p, Side::Right, q);
        link(&mut arena, q, Side::Left, inner);

        let root = rotate(&mut arena, p, Side::Left);
        assert_eq!(root, q);
        assert_eq!(arena[p].right, Some(inner));
        assert_eq!(arena[inner].parent, Some(p));

        let mut keys = Vec::new();
        keys_in_order(&arena, Some(root), &mut keys);
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn test_double_rotate_zig_zag() {
        let mut arena = Arena::new();
        let a = node(&mut arena, 3, -2);
        let b = node(&mut arena, 1, 1);
        let c = node(&mut arena, 2, 0);
        link(&mut arena, a, Side::Left, b);
        link(&mut arena, b, Side::Right, c);

        let root = rebalance(&mut arena, a);
        assert_eq!(root, c);
        assert_eq!(arena[c].left, Some(b));
        assert_eq!(arena[c].right, Some(a));
        assert_eq!(arena[b].parent, Some(c));
        assert_eq!(arena[a].parent, Some(c));
        for handle in &[a, b, c] {
            assert_eq!(arena[*handle].balance, 0);
        }
    }

    #[test]
    fn test_double_rotate_without_balances() {
        let mut arena = Arena::new();
        let a = node(&mut arena, 1, 0);
        let b = node(&mut arena, 3, 0);
        let c = node(&mut arena, 2, 0);
        link(&mut arena, a, Side::Right, b);
        link(&mut arena, b, Side::Left, c);

        let root = double_rotate(&mut arena, a, Side::Left);
        assert_eq!(root, c);
        let mut keys = Vec::new();
        keys_in_order(&arena, Some(root), &mut keys);
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn test_rebalance_keeps_height_after_removal() {
        // right-heavy root whose right child is balanced, as left by a removal
        let mut arena = Arena::new();
        let a = node(&mut arena, 1, 2);
        let b = node(&mut arena, 3, 0);
        let c = node(&mut arena, 2, 0);
        let d = node(&mut arena, 4, 0);
        link(&mut arena, a, Side::Right, b);
        link(&mut arena, b, Side::Left, c);
        link(&mut arena, b, Side::Right, d);

        let root = rebalance(&mut arena, a);
        assert_eq!(root, b);
        assert_eq!(arena[b].balance, -1);
        assert_eq!(arena[a].balance, 1);
    }

    #[test]
    fn test_splice() {
        let mut arena = Arena::new();
        let p = node(&mut arena, 2, 0);
        let old = node(&mut arena, 1, 0);
        let new = node(&mut arena, 0, 0);
        link(&mut arena, p, Side::Left, old);

        let mut root = Some(p);
        splice(&mut arena, &mut root, Some(p), old, Some(new));
        assert_eq!(arena[p].left, Some(new));

        splice(&mut arena, &mut root, None, p, Some(new));
        assert_eq!(root, Some(new));
    }
}
