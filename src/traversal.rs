//! Navigation helpers. Everything except `find` and `extreme` relies on parent back-references.

use crate::arena::{Arena, Handle};
use crate::node::{BinaryNode, Link, Side};
use std::borrow::Borrow;
use std::cmp::Ordering;

/// Descends from `link` and returns the node whose key equals `key`.
pub fn find<N, Q>(arena: &Arena<N>, mut link: Link, key: &Q) -> Link
where
    N: BinaryNode,
    N::Key: Borrow<Q>,
    Q: Ord + ?Sized,
{
    while let Some(handle) = link {
        link = match key.cmp(arena[handle].key().borrow()) {
            Ordering::Less => arena[handle].child(Side::Left),
            Ordering::Greater => arena[handle].child(Side::Right),
            Ordering::Equal => return Some(handle),
        };
    }
    None
}

/// Follows `side` links from `handle` until there are none left.
pub fn extreme<N: BinaryNode>(arena: &Arena<N>, mut handle: Handle, side: Side) -> Handle {
    while let Some(next) = arena[handle].child(side) {
        handle = next;
    }
    handle
}

/// Returns the in-order successor of `handle`: the leftmost node of its right subtree, or the
/// first ancestor reached from a left child.
pub fn successor<N: BinaryNode>(arena: &Arena<N>, handle: Handle) -> Link {
    if let Some(right) = arena[handle].child(Side::Right) {
        return Some(extreme(arena, right, Side::Left));
    }
    let mut child = handle;
    let mut parent = arena[handle].parent();
    while let Some(curr) = parent {
        if arena[curr].child(Side::Left) == Some(child) {
            return Some(curr);
        }
        child = curr;
        parent = arena[curr].parent();
    }
    None
}

/// Post-order position in a parent-linked tree.
///
/// The cursor is either descending (about to try the right subtree of `next`) or ascending
/// (about to yield `next`). A node is never read again once it has been yielded, so a caller
/// may free each yielded node before advancing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PostorderCursor {
    next: Link,
    descending: bool,
}

impl PostorderCursor {
    pub fn new<N: BinaryNode>(arena: &Arena<N>, root: Link) -> Self {
        PostorderCursor {
            next: root.map(|root| extreme(arena, root, Side::Left)),
            descending: true,
        }
    }

    pub fn advance<N: BinaryNode>(&mut self, arena: &Arena<N>) -> Link {
        loop {
            let curr = self.next?;
            if self.descending {
                match arena[curr].child(Side::Right) {
                    Some(right) => self.next = Some(extreme(arena, right, Side::Left)),
                    None => self.descending = false,
                }
            } else {
                let parent = arena[curr].parent();
                self.descending = match parent {
                    Some(parent) => arena[parent].child(Side::Right) != Some(curr),
                    None => false,
                };
                self.next = parent;
                return Some(curr);
            }
        }
    }
}
