use crate::arena::{Arena, Handle};
use crate::error::ValidationError;
use crate::node::{Link, Side};
use crate::ordered_set::{self, OrderedSet};
use crate::red_black_tree::iter::{Iter, Postorder};
use crate::red_black_tree::node::Node;
use crate::red_black_tree::tree;
use crate::traversal::{extreme, find, successor, PostorderCursor};
use crate::validate;
use log::debug;
use std::borrow::Borrow;
use std::fmt;
use std::iter::{self, FromIterator};

/// An ordered set implemented using a red black tree whose nodes keep a link to their parent.
///
/// A red black tree is a self-balancing binary search tree where every node is colored red or
/// black. The root is black, a red node never has a red child, and every path from a node down
/// to an absent child passes through the same number of black nodes. Together these keep the
/// longest path at most twice as long as the shortest one.
///
/// # Examples
///
/// ```
/// use balanced_collections::red_black_tree::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// tree.insert(0);
/// tree.insert(3);
///
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.max(), Some(&3));
///
/// assert!(tree.remove(&0));
/// assert!(!tree.remove(&1));
/// assert!(tree.is_valid());
/// ```
#[derive(Clone)]
pub struct RedBlackTree<T> {
    arena: Arena<Node<T>>,
    root: Link,
}

impl<T> RedBlackTree<T> {
    /// Constructs a new, empty `RedBlackTree<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = RedBlackTree::new();
    /// ```
    pub fn new() -> Self {
        RedBlackTree {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Constructs a new, empty `RedBlackTree<T>` with room for `capacity` keys before its node
    /// storage reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        RedBlackTree {
            arena: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every key from the tree, releasing nodes in post-order.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// ```
    pub fn clear(&mut self) {
        if self.root.is_some() {
            debug!("clearing red black tree with {} nodes", self.len());
        }
        let mut cursor = PostorderCursor::new(&self.arena, self.root.take());
        while let Some(handle) = cursor.advance(&self.arena) {
            self.arena.free(handle);
        }
        self.arena.clear();
    }

    pub fn min(&self) -> Option<&T> {
        self.root
            .map(|root| &self.arena[extreme(&self.arena, root, Side::Left)].key)
    }

    pub fn max(&self) -> Option<&T> {
        self.root
            .map(|root| &self.arena[extreme(&self.arena, root, Side::Right)].key)
    }

    /// Returns an iterator over the tree in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    ///
    /// let mut iterator = tree.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&2));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.arena, self.root)
    }

    /// Returns an iterator over the tree in post-order.
    pub fn postorder(&self) -> Postorder<'_, T> {
        Postorder::new(&self.arena, self.root)
    }

    fn postorder_handles(&self) -> impl Iterator<Item = Handle> + '_ {
        let arena = &self.arena;
        let mut cursor = PostorderCursor::new(arena, self.root);
        iter::from_fn(move || cursor.advance(arena))
    }

    fn inorder_handles(&self) -> impl Iterator<Item = Handle> + '_ {
        let arena = &self.arena;
        let first = self.root.map(|root| extreme(arena, root, Side::Left));
        iter::successors(first, move |handle| successor(arena, *handle))
    }
}

impl<T> RedBlackTree<T>
where
    T: Ord,
{
    /// Inserts a key into the tree. Returns `false` and leaves the tree unchanged if an equal key
    /// already exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// ```
    pub fn insert(&mut self, key: T) -> bool {
        tree::insert(&mut self.arena, &mut self.root, key)
    }

    /// Removes a key from the tree. Returns `false` if the key does not exist.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        tree::remove(&mut self.arena, &mut self.root, key).is_some()
    }

    /// Checks if a key exists in the tree.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        find(&self.arena, self.root, key).is_some()
    }

    /// Returns a new tree holding the keys present both in this tree and in `other`, which must
    /// yield its keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackTree;
    ///
    /// let left: RedBlackTree<u32> = vec![1, 2, 3].into_iter().collect();
    /// let right: RedBlackTree<u32> = vec![3, 4].into_iter().collect();
    /// assert_eq!(left.intersect(&right).len(), 1);
    /// ```
    pub fn intersect<'a, I>(&self, other: I) -> Self
    where
        T: Clone + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        ordered_set::intersection(self.iter(), other)
    }

    /// Recomputes ordering, parent links and the coloring rules from the node links.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let result = self.check();
        if let Err(ref error) = result {
            debug!("red black tree failed validation: {}", error);
        }
        result
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    fn check(&self) -> Result<(), ValidationError> {
        validate::check_parents(&self.arena, self.root, self.postorder_handles())?;
        let count = validate::check_order(&self.arena, self.inorder_handles())?;
        validate::check_count(&self.arena, count)?;
        tree::check_colors(&self.arena, self.root, self.postorder_handles())
    }
}

impl<T> Drop for RedBlackTree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for RedBlackTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RedBlackTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> OrderedSet<T> for RedBlackTree<T>
where
    T: Ord,
{
    fn insert(&mut self, key: T) -> bool {
        RedBlackTree::insert(self, key)
    }

    fn remove(&mut self, key: &T) -> bool {
        RedBlackTree::remove(self, key)
    }

    fn contains(&self, key: &T) -> bool {
        RedBlackTree::contains(self, key)
    }

    fn clear(&mut self) {
        RedBlackTree::clear(self)
    }

    fn len(&self) -> usize {
        RedBlackTree::len(self)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        RedBlackTree::validate(self)
    }
}

impl<T> FromIterator<T> for RedBlackTree<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = RedBlackTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for RedBlackTree<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, T> IntoIterator for &'a RedBlackTree<T>
where
    T: 'a,
{
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
