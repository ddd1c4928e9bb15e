use crate::arena::Arena;
use crate::avl_tree::tree::insert;
use crate::error::ValidationError;
use crate::node::{Link, Side};
use crate::ordered_set::{self, OrderedSet};
use crate::threaded_avl_tree::iter::{
    Iter, Postorder, PostorderCursor, StackedInorder, StackedPostorder,
};
use crate::threaded_avl_tree::node::Node;
use crate::threaded_avl_tree::tree;
use crate::traversal::{extreme, find};
use crate::validate;
use log::debug;
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;

/// An ordered set implemented using an avl tree whose nodes have no parent link.
///
/// Insertion and removal both run top-down, and traversal uses Morris threading: the empty
/// right link of a node's in-order predecessor temporarily points back at the node. Because a
/// traversal rewrites links, `iter` and `postorder` borrow the tree mutably, which rules out
/// any other use of the tree while an iterator is alive. An iterator that is dropped early
/// removes the threads it installed before it goes away. Methods that only borrow the tree
/// (`intersect`, `validate` and `Debug`) never thread it, since the key comparisons and
/// formatting they call out to may read the tree themselves.
///
/// # Examples
///
/// ```
/// use balanced_collections::threaded_avl_tree::ThreadedAvlTree;
///
/// let mut tree = ThreadedAvlTree::new();
/// for key in &[5, 2, 8, 1] {
///     tree.insert(*key);
/// }
///
/// // stop after two keys; the iterator cleans up when dropped
/// assert_eq!(tree.iter().take(2).collect::<Vec<&u32>>(), vec![&1, &2]);
///
/// assert!(tree.remove(&2));
/// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &5, &8]);
/// assert!(tree.is_valid());
/// ```
#[derive(Clone)]
pub struct ThreadedAvlTree<T> {
    arena: Arena<Node<T>>,
    root: Link,
}

impl<T> ThreadedAvlTree<T> {
    /// Constructs a new, empty `ThreadedAvlTree<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::threaded_avl_tree::ThreadedAvlTree;
    ///
    /// let tree: ThreadedAvlTree<u32> = ThreadedAvlTree::new();
    /// ```
    pub fn new() -> Self {
        ThreadedAvlTree {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Constructs a new, empty `ThreadedAvlTree<T>` with room for `capacity` keys before its
    /// node storage reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        ThreadedAvlTree {
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

    /// Removes every key from the tree. The nodes are released in the order a post-order
    /// traversal yields them.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::threaded_avl_tree::ThreadedAvlTree;
    ///
    /// let mut tree = ThreadedAvlTree::new();
    /// tree.insert(1);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// ```
    pub fn clear(&mut self) {
        if self.root.is_some() {
            debug!("clearing threaded avl tree with {} nodes", self.len());
        }
        let mut cursor = PostorderCursor::new(self.root.take());
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
    /// use balanced_collections::threaded_avl_tree::ThreadedAvlTree;
    ///
    /// let mut tree = ThreadedAvlTree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    ///
    /// let mut iterator = tree.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&2));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&mut self) -> Iter<'_, T> {
        Iter::new(&self.arena, self.root)
    }

    /// Returns an iterator over the tree in post-order.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::threaded_avl_tree::ThreadedAvlTree;
    ///
    /// let mut tree: ThreadedAvlTree<u32> = vec![2, 1, 3].into_iter().collect();
    /// assert_eq!(tree.postorder().collect::<Vec<&u32>>(), vec![&1, &3, &2]);
    /// ```
    pub fn postorder(&mut self) -> Postorder<'_, T> {
        Postorder::new(&self.arena, self.root)
    }

    fn keys(&self) -> impl Iterator<Item = &T> + '_ {
        let arena = &self.arena;
        StackedInorder::new(arena, self.root).map(move |handle| &arena[handle].key)
    }
}

impl<T> ThreadedAvlTree<T>
where
    T: Ord,
{
    /// Inserts a key into the tree. Returns `false` and leaves the tree unchanged if an equal key
    /// already exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::threaded_avl_tree::ThreadedAvlTree;
    ///
    /// let mut tree = ThreadedAvlTree::new();
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// ```
    pub fn insert(&mut self, key: T) -> bool {
        insert(&mut self.arena, &mut self.root, Node::new(key))
    }

    /// Removes a key from the tree. Returns `false` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::threaded_avl_tree::ThreadedAvlTree;
    ///
    /// let mut tree = ThreadedAvlTree::new();
    /// tree.insert(1);
    /// assert!(tree.remove(&1));
    /// assert!(!tree.remove(&1));
    /// ```
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
    /// use balanced_collections::threaded_avl_tree::ThreadedAvlTree;
    ///
    /// let left: ThreadedAvlTree<u32> = vec![1, 2, 3].into_iter().collect();
    /// let mut right: ThreadedAvlTree<u32> = vec![2, 3, 4].into_iter().collect();
    ///
    /// let mut both = left.intersect(&mut right);
    /// assert_eq!(both.iter().collect::<Vec<&u32>>(), vec![&2, &3]);
    /// ```
    pub fn intersect<'a, I>(&self, other: I) -> Self
    where
        T: Clone + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        ordered_set::intersection(self.keys(), other)
    }

    /// Recomputes ordering and balance factors from the node links.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let result = self.check();
        if let Err(ref error) = result {
            debug!("threaded avl tree failed validation: {}", error);
        }
        result
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    fn check(&self) -> Result<(), ValidationError> {
        let count =
            validate::check_order(&self.arena, StackedInorder::new(&self.arena, self.root))?;
        validate::check_count(&self.arena, count)?;
        validate::check_heights(&self.arena, StackedPostorder::new(&self.arena, self.root))
    }
}

impl<T> Drop for ThreadedAvlTree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for ThreadedAvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ThreadedAvlTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}

impl<T> OrderedSet<T> for ThreadedAvlTree<T>
where
    T: Ord,
{
    fn insert(&mut self, key: T) -> bool {
        ThreadedAvlTree::insert(self, key)
    }

    fn remove(&mut self, key: &T) -> bool {
        ThreadedAvlTree::remove(self, key)
    }

    fn contains(&self, key: &T) -> bool {
        ThreadedAvlTree::contains(self, key)
    }

    fn clear(&mut self) {
        ThreadedAvlTree::clear(self)
    }

    fn len(&self) -> usize {
        ThreadedAvlTree::len(self)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        ThreadedAvlTree::validate(self)
    }
}

impl<T> FromIterator<T> for ThreadedAvlTree<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = ThreadedAvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for ThreadedAvlTree<T>
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

impl<'a, T> IntoIterator for &'a mut ThreadedAvlTree<T>
where
    T: 'a,
{
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::ThreadedAvlTree;
    use crate::error::ValidationError;
    use std::mem;

    #[test]
    fn test_len_empty() {
        let tree: ThreadedAvlTree<u32> = ThreadedAvlTree::new();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_valid());
    }

    #[test]
    fn test_insert_remove() {
        let mut tree = ThreadedAvlTree::new();
        assert!(tree.insert(1));
        assert!(!tree.insert(1));
        assert!(tree.contains(&1));
        assert!(tree.remove(&1));
        assert!(!tree.remove(&1));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_iter_interrupted() {
        let mut tree: ThreadedAvlTree<u32> = (0..32).collect();
        {
            let mut iter = tree.iter();
            assert_eq!(iter.next(), Some(&0));
            assert!(iter.threads() > 0);
        }
        assert!(tree.is_valid());
        assert_eq!(tree.iter().count(), 32);
    }

    #[test]
    fn test_postorder_interrupted() {
        let mut tree: ThreadedAvlTree<u32> = (0..32).collect();
        for stop in 0..32 {
            assert_eq!(tree.postorder().take(stop).count(), stop);
            assert!(tree.is_valid());
        }
        assert_eq!(tree.iter().cloned().collect::<Vec<u32>>(), (0..32).collect::<Vec<u32>>());
    }

    #[test]
    fn test_iter_cursor_state() {
        let mut left: ThreadedAvlTree<u32> = vec![2, 1, 3].into_iter().collect();
        let mut right = left.clone();
        let mut left_iter = left.iter();
        let mut right_iter = right.iter();
        assert_eq!(left_iter.cursor(), right_iter.cursor());

        let start = left_iter.cursor();
        assert_eq!(left_iter.next(), Some(&1));
        assert_ne!(left_iter.cursor(), start);
        assert_ne!(left_iter.cursor(), right_iter.cursor());
        assert_eq!(left_iter.cursor().threads(), 1);

        assert_eq!(right_iter.next(), Some(&1));
        assert_eq!(left_iter.cursor(), right_iter.cursor());
    }

    #[test]
    fn test_postorder_cursor_state() {
        let mut left: ThreadedAvlTree<u32> = (0..7).collect();
        let mut right = left.clone();
        let mut left_iter = left.postorder();
        let mut right_iter = right.postorder();
        for _ in 0..3 {
            left_iter.next();
            assert_ne!(left_iter.cursor(), right_iter.cursor());
            right_iter.next();
            assert_eq!(left_iter.cursor(), right_iter.cursor());
        }
    }

    #[test]
    fn test_min_max() {
        let tree: ThreadedAvlTree<u32> = vec![3, 1, 5].into_iter().collect();
        assert_eq!(tree.min(), Some(&1));
        assert_eq!(tree.max(), Some(&5));
    }

    #[test]
    fn test_intersect_leaves_inputs_intact() {
        let left: ThreadedAvlTree<u32> = (0..20).collect();
        let right: ThreadedAvlTree<u32> = (10..30).collect();
        let both = left.intersect(right.keys());
        assert_eq!(both.len(), 10);
        assert!(left.is_valid());
        assert!(right.is_valid());
    }

    #[test]
    fn test_intersect_with_reads_during_walk() {
        let tree: ThreadedAvlTree<i32> = (0..101).map(|key| key * 10).collect();
        let other: Vec<i32> = (0..1010).collect();
        let both = tree.intersect(other.iter().filter(|key| !tree.contains(&(**key + 5))));
        assert_eq!(both.len(), 101);
        assert_eq!(tree.min(), Some(&0));
        assert_eq!(tree.max(), Some(&1000));
        assert!(tree.is_valid());
    }

    #[test]
    fn test_take_leaves_empty_tree() {
        let mut tree: ThreadedAvlTree<u32> = (0..10).collect();
        let mut moved = mem::take(&mut tree);
        assert!(tree.is_empty());
        assert!(tree.insert(3));
        assert_eq!(moved.iter().count(), 10);
    }

    #[test]
    fn test_validate_detects_bad_balance() {
        let mut tree: ThreadedAvlTree<u32> = (0..3).collect();
        let root = tree.root.unwrap();
        tree.arena[root].balance = -1;
        assert_eq!(
            tree.validate(),
            Err(ValidationError::BalanceMismatch {
                node: root.index(),
                stored: -1,
                computed: 0,
            }),
        );
        tree.arena[root].balance = 0;
        assert!(tree.is_valid());
    }

    #[test]
    fn test_debug() {
        let tree: ThreadedAvlTree<u32> = vec![2, 1].into_iter().collect();
        assert_eq!(format!("{:?}", tree), "{1, 2}");
    }
}
