use crate::arena::Arena;
use crate::avl_tree::node::Node;
use crate::node::{Link, Side};
use crate::traversal::{extreme, successor, PostorderCursor};

/// An iterator over the keys of an `AvlTree<T>` in ascending order.
///
/// This iterator traverses the elements of the tree in-order by following parent links, so it
/// needs no auxiliary storage.
pub struct Iter<'a, T> {
    arena: &'a Arena<Node<T>>,
    next: Link,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(arena: &'a Arena<Node<T>>, root: Link) -> Self {
        Iter {
            arena,
            next: root.map(|root| extreme(arena, root, Side::Left)),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let curr = self.next?;
        self.next = successor(self.arena, curr);
        Some(&self.arena[curr].key)
    }
}

/// An iterator over the keys of an `AvlTree<T>` in post-order: both subtrees of a node are
/// visited before the node itself.
pub struct Postorder<'a, T> {
    arena: &'a Arena<Node<T>>,
    cursor: PostorderCursor,
}

impl<'a, T> Postorder<'a, T> {
    pub(super) fn new(arena: &'a Arena<Node<T>>, root: Link) -> Self {
        Postorder {
            arena,
            cursor: PostorderCursor::new(arena, root),
        }
    }
}

impl<'a, T> Iterator for Postorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        self.cursor.advance(arena).map(|handle| &arena[handle].key)
    }
}
