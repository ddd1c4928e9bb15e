use crate::arena::Arena;
use crate::node::{BinaryNode, Link, Side};
use crate::rotation::{rebalance, side_of, splice};
use crate::threaded_avl_tree::node::Node;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

/// Removes the node holding `key` without parent links and returns its key.
///
/// The descent finds the node to unlink (the target itself, or its in-order successor when the
/// target has two children) and remembers the deepest node on the path at which a height
/// change from below stops propagating: a node that is balanced, or one that will need a
/// rotation whose rising child is balanced. Nothing above that node changes, so a second walk
/// from it down to the unlinked node applies every balance update and rotation top-down.
pub fn remove<T, Q>(arena: &mut Arena<Node<T>>, root: &mut Link, key: &Q) -> Option<T>
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut curr = (*root)?;
    let mut parent = None;
    let mut head = curr;
    let mut head_parent = None;
    let mut target = None;

    loop {
        let side = match target {
            Some(_) => Side::Left,
            None => match key.cmp(arena[curr].key.borrow()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    target = Some(curr);
                    if arena[curr].left.is_none() || arena[curr].right.get().is_none() {
                        break;
                    }
                    Side::Right
                },
            },
        };
        let next = match arena[curr].child(side) {
            Some(next) => next,
            None if target.is_none() => return None,
            None => break,
        };

        let balance = arena[curr].balance;
        let sibling_balanced = arena[curr]
            .child(side.opposite())
            .map_or(false, |sibling| arena[sibling].balance == 0);
        if balance == 0 || (balance == -side.sign() && sibling_balanced) {
            head = curr;
            head_parent = parent;
        }
        parent = Some(curr);
        curr = next;
    }
    let removed = curr;
    let target = target.expect("Expected the descent to stop below the target.");

    let mut node = head;
    let mut above = head_parent;
    while node != removed {
        let side = if node == target {
            Side::Right
        } else {
            match key.cmp(arena[node].key.borrow()) {
                Ordering::Less | Ordering::Equal => Side::Left,
                Ordering::Greater => Side::Right,
            }
        };
        let next = arena[node]
            .child(side)
            .expect("Expected the path to reach the removed node.");
        let balance = arena[node].balance - side.sign();
        arena[node].balance = balance;
        if balance.abs() == 2 {
            let subtree = rebalance(arena, node);
            splice(arena, root, above, node, Some(subtree));
        }
        above = Some(node);
        node = next;
    }

    let child = arena[removed].left.or(arena[removed].right.get());
    match parent {
        Some(parent) => {
            let side = side_of(arena, parent, removed);
            arena[parent].set_child(side, child);
        },
        None => *root = child,
    }
    let mut key = arena.free(removed).key;
    if removed != target {
        mem::swap(&mut arena[target].key, &mut key);
    }
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::remove;
    use crate::arena::Arena;
    use crate::avl_tree::tree::insert;
    use crate::node::Link;
    use crate::threaded_avl_tree::node::Node;

    fn build(keys: &[u32]) -> (Arena<Node<u32>>, Link) {
        let mut arena = Arena::new();
        let mut root = None;
        for key in keys {
            insert(&mut arena, &mut root, Node::new(*key));
        }
        (arena, root)
    }

    #[test]
    fn test_remove_leaf_rotates() {
        let (mut arena, mut root) = build(&[2, 1, 3, 4]);
        assert_eq!(remove(&mut arena, &mut root, &1), Some(1));
        let root = root.unwrap();
        assert_eq!(arena[root].key, 3);
        assert_eq!(arena[root].balance, 0);
    }

    #[test]
    fn test_remove_two_children() {
        let (mut arena, mut root) = build(&[2, 1, 3]);
        assert_eq!(remove(&mut arena, &mut root, &2), Some(2));
        let root = root.unwrap();
        assert_eq!(arena[root].key, 3);
        assert_eq!(arena[root].balance, -1);
        assert_eq!(arena[root].right.get(), None);
    }

    #[test]
    fn test_remove_missing() {
        let (mut arena, mut root) = build(&[2, 1, 3]);
        assert_eq!(remove(&mut arena, &mut root, &0), None);
        assert_eq!(remove(&mut arena, &mut root, &4), None);
        assert_eq!(arena.len(), 3);
    }
}
