//! Morris traversals.
//!
//! Both cursors walk the tree without a stack by pointing the empty right link of an in-order
//! predecessor back at the node it precedes. Each cursor counts the threads it has installed.
//! Dropping an iterator part way through switches its cursor into abort mode, in which it only
//! removes threads and never yields, until the count returns to zero.
//!
//! Threads are only installed while the tree is mutably borrowed. Walks that run under a shared
//! borrow use the stacked variants, which leave every link alone.

use crate::arena::{Arena, Handle};
use crate::node::Link;
use crate::threaded_avl_tree::node::Node;
use log::debug;

/// Returns the rightmost node of the left subtree of `node`, stopping early at a thread that
/// already points back at `node`.
fn predecessor<T>(arena: &Arena<Node<T>>, node: Handle, left: Handle) -> Handle {
    let mut pred = left;
    while let Some(next) = arena[pred].right.get() {
        if next == node {
            break;
        }
        pred = next;
    }
    pred
}

/// State of an in-order Morris traversal.
///
/// `continuation` is set while `current` has just been yielded, so that the next advance moves
/// past it instead of yielding it again.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct InorderCursor {
    current: Link,
    predecessor: Link,
    threads: usize,
    abort: bool,
    continuation: bool,
}

impl InorderCursor {
    pub(crate) fn new(root: Link) -> Self {
        InorderCursor {
            current: root,
            ..InorderCursor::default()
        }
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub(crate) fn advance<T>(&mut self, arena: &Arena<Node<T>>) -> Link {
        while let Some(curr) = self.current {
            let left = match arena[curr].left {
                Some(left) => left,
                None => {
                    if !self.abort && !self.continuation {
                        self.continuation = true;
                        return Some(curr);
                    }
                    self.continuation = false;
                    if self.abort && self.threads == 0 {
                        break;
                    }
                    self.current = arena[curr].right.get();
                    continue;
                },
            };

            let pred = predecessor(arena, curr, left);
            self.predecessor = Some(pred);
            if arena[pred].right.get().is_none() && !self.abort {
                arena[pred].right.set(Some(curr));
                self.threads += 1;
                self.current = Some(left);
                continue;
            }

            if !self.abort && !self.continuation {
                self.continuation = true;
                return Some(curr);
            }
            self.continuation = false;
            if arena[pred].right.get().is_some() {
                arena[pred].right.set(None);
                self.threads -= 1;
            }
            if self.abort && self.threads == 0 {
                break;
            }
            self.current = arena[curr].right.get();
        }

        *self = InorderCursor::default();
        None
    }

    /// Removes every thread the cursor still has installed and moves it to the end.
    pub(crate) fn unwind<T>(&mut self, arena: &Arena<Node<T>>) {
        if self.threads > 0 {
            debug!("unwinding {} in-order threads", self.threads);
            self.abort = true;
            self.advance(arena);
        }
        *self = InorderCursor::default();
    }
}

/// State of a post-order Morris traversal.
///
/// The walk starts at a synthetic root, `Handle::ANCHOR`, whose left child is the real root and
/// whose right child is always absent. When the thread into a node is found, the right spine
/// of its left subtree is reversed and then restored bottom-up, yielding one spine node per
/// step; `first` and `middle` hold the position within that restoration.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PostorderCursor {
    current: Link,
    predecessor: Link,
    anchor_left: Link,
    first: Link,
    middle: Link,
    threads: usize,
    abort: bool,
    continuation: bool,
}

impl PostorderCursor {
    pub(crate) fn new(root: Link) -> Self {
        PostorderCursor {
            current: root.map(|_| Handle::ANCHOR),
            anchor_left: root,
            ..PostorderCursor::default()
        }
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    fn left<T>(&self, arena: &Arena<Node<T>>, node: Handle) -> Link {
        if node == Handle::ANCHOR {
            self.anchor_left
        } else {
            arena[node].left
        }
    }

    fn right<T>(arena: &Arena<Node<T>>, node: Handle) -> Link {
        if node == Handle::ANCHOR {
            None
        } else {
            arena[node].right.get()
        }
    }

    pub(crate) fn advance<T>(&mut self, arena: &Arena<Node<T>>) -> Link {
        while let Some(curr) = self.current {
            let left = match self.left(arena, curr) {
                Some(left) => left,
                None => {
                    self.current = Self::right(arena, curr);
                    continue;
                },
            };

            if !self.continuation {
                let pred = predecessor(arena, curr, left);
                self.predecessor = Some(pred);
                if arena[pred].right.get().is_none() {
                    // an untouched subtree holds no threads, so abort mode skips it
                    if !self.abort {
                        arena[pred].right.set(Some(curr));
                        self.threads += 1;
                        self.current = Some(left);
                    } else {
                        self.current = Self::right(arena, curr);
                    }
                    continue;
                }
            }

            if !self.abort || self.continuation {
                if !self.continuation {
                    // reverse the spine so that every right link points one step back up
                    let mut first = curr;
                    let mut middle = left;
                    while middle != curr {
                        let last = arena[middle]
                            .right
                            .get()
                            .expect("Expected the right spine to end in a thread.");
                        arena[middle].right.set(Some(first));
                        first = middle;
                        middle = last;
                    }
                    self.first = Some(curr);
                    self.middle = self.predecessor;
                }

                let mut first = self.first.expect("Expected a spine position.");
                let mut middle = self.middle.expect("Expected a spine position.");
                while middle != curr {
                    let cap = middle;
                    let last = arena[cap]
                        .right
                        .get()
                        .expect("Expected the reversed spine to lead back to its top.");
                    arena[cap]
                        .right
                        .set(if first == curr { None } else { Some(first) });
                    first = cap;
                    middle = last;
                    if !self.abort {
                        self.first = Some(first);
                        self.middle = Some(middle);
                        self.continuation = true;
                        return Some(cap);
                    }
                }
                self.continuation = false;
            } else {
                let pred = self
                    .predecessor
                    .expect("Expected a predecessor holding a thread.");
                arena[pred].right.set(None);
            }

            self.threads -= 1;
            if self.abort && self.threads == 0 {
                break;
            }
            self.current = Self::right(arena, curr);
        }

        *self = PostorderCursor::default();
        None
    }

    /// Restores every link the cursor still has rewritten and moves it to the end.
    pub(crate) fn unwind<T>(&mut self, arena: &Arena<Node<T>>) {
        if self.threads > 0 {
            debug!("unwinding {} post-order threads", self.threads);
            self.abort = true;
            self.advance(arena);
        }
        *self = PostorderCursor::default();
    }
}

/// In-order walk that keeps the pending left spine on a stack and never writes a link. Used by
/// the methods that only hold `&self`, since code they call back into may read the tree.
pub struct StackedInorder<'a, T> {
    arena: &'a Arena<Node<T>>,
    stack: Vec<Handle>,
}

impl<'a, T> StackedInorder<'a, T> {
    pub fn new(arena: &'a Arena<Node<T>>, root: Link) -> Self {
        let mut walk = StackedInorder {
            arena,
            stack: Vec::new(),
        };
        walk.descend(root);
        walk
    }

    fn descend(&mut self, mut link: Link) {
        while let Some(handle) = link {
            self.stack.push(handle);
            link = self.arena[handle].left;
        }
    }
}

impl<'a, T> Iterator for StackedInorder<'a, T> {
    type Item = Handle;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.stack.pop()?;
        self.descend(self.arena[handle].right.get());
        Some(handle)
    }
}

/// Post-order counterpart of `StackedInorder`. Each entry records whether its right subtree has
/// already been pushed.
pub struct StackedPostorder<'a, T> {
    arena: &'a Arena<Node<T>>,
    stack: Vec<(Handle, bool)>,
}

impl<'a, T> StackedPostorder<'a, T> {
    pub fn new(arena: &'a Arena<Node<T>>, root: Link) -> Self {
        let mut walk = StackedPostorder {
            arena,
            stack: Vec::new(),
        };
        walk.descend(root);
        walk
    }

    fn descend(&mut self, mut link: Link) {
        while let Some(handle) = link {
            self.stack.push((handle, false));
            link = self.arena[handle].left;
        }
    }
}

impl<'a, T> Iterator for StackedPostorder<'a, T> {
    type Item = Handle;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (handle, expanded) = self.stack.last_mut()?;
            let handle = *handle;
            match self.arena[handle].right.get() {
                Some(right) if !*expanded => {
                    *expanded = true;
                    self.descend(Some(right));
                },
                _ => {
                    self.stack.pop();
                    return Some(handle);
                },
            }
        }
    }
}

/// An iterator over the keys of a `ThreadedAvlTree<T>` in ascending order.
///
/// The iterator threads the tree as it goes. If it is dropped before reaching the end, it
/// finishes removing its threads first, so the tree is intact once the iterator is gone.
pub struct Iter<'a, T> {
    arena: &'a Arena<Node<T>>,
    cursor: InorderCursor,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(arena: &'a Arena<Node<T>>, root: Link) -> Self {
        Iter {
            arena,
            cursor: InorderCursor::new(root),
        }
    }

    /// Returns a copy of the traversal state. Two states compare equal when every field matches,
    /// including installed threads and a pending continuation.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::threaded_avl_tree::ThreadedAvlTree;
    ///
    /// let mut tree: ThreadedAvlTree<u32> = vec![2, 1, 3].into_iter().collect();
    /// let mut iter = tree.iter();
    /// let start = iter.cursor();
    ///
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_ne!(iter.cursor(), start);
    /// assert_eq!(iter.cursor().threads(), 1);
    /// ```
    pub fn cursor(&self) -> InorderCursor {
        self.cursor
    }

    /// Returns the number of threads currently installed in the tree.
    pub fn threads(&self) -> usize {
        self.cursor.threads()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        self.cursor.advance(arena).map(|handle| &arena[handle].key)
    }
}

impl<'a, T> Drop for Iter<'a, T> {
    fn drop(&mut self) {
        self.cursor.unwind(self.arena);
    }
}

/// An iterator over the keys of a `ThreadedAvlTree<T>` in post-order.
///
/// Like `Iter`, it restores every rewritten link when dropped early.
pub struct Postorder<'a, T> {
    arena: &'a Arena<Node<T>>,
    cursor: PostorderCursor,
}

impl<'a, T> Postorder<'a, T> {
    pub(super) fn new(arena: &'a Arena<Node<T>>, root: Link) -> Self {
        Postorder {
            arena,
            cursor: PostorderCursor::new(root),
        }
    }

    /// Returns a copy of the traversal state.
    pub fn cursor(&self) -> PostorderCursor {
        self.cursor
    }

    /// Returns the number of threads currently installed in the tree.
    pub fn threads(&self) -> usize {
        self.cursor.threads()
    }
}

impl<'a, T> Iterator for Postorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        self.cursor.advance(arena).map(|handle| &arena[handle].key)
    }
}

impl<'a, T> Drop for Postorder<'a, T> {
    fn drop(&mut self) {
        self.cursor.unwind(self.arena);
    }
}
