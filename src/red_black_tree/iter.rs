use crate::arena::Arena;
use crate::node::{Link, Side};
use crate::red_black_tree::node::Node;
use crate::traversal::{extreme, successor, PostorderCursor};

/// An iterator over the keys of a `RedBlackTree<T>` in ascending order.
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

/// An iterator over the keys of a `RedBlackTree<T>` in post-order.
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
