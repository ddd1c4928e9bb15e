use crate::arena::{Arena, Handle};
use crate::avl_tree::iter::{Iter, Postorder};
use crate::avl_tree::node::Node;
use crate::avl_tree::tree;
use crate::error::ValidationError;
use crate::node::{Link, Side};
use crate::ordered_set::{self, OrderedSet};
use crate::traversal::{extreme, find, successor, PostorderCursor};
use crate::validate;
use log::debug;
use std::borrow::Borrow;
use std::fmt;
use std::iter::{self, FromIterator};

/// An ordered set implemented using an avl tree whose nodes keep a link to their parent.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of the two child subtrees of any node differ by at most one. Every node stores its
/// balance factor, the height of its right subtree minus the height of its left subtree, so an
/// insertion needs at most one rotation and a removal at most one rotation per level.
///
/// # Examples
///
/// ```
/// use balanced_collections::avl_tree::AvlTree;
///
/// let mut tree = AvlTree::new();
/// tree.insert(0);
/// tree.insert(3);
///
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.min(), Some(&0));
///
/// assert!(tree.remove(&0));
/// assert!(!tree.remove(&1));
/// assert!(tree.is_valid());
/// ```
#[derive(Clone)]
pub struct AvlTree<T> {
    arena: Arena<Node<T>>,
    root: Link,
}

impl<T> AvlTree<T> {
    /// Constructs a new, empty `AvlTree<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlTree;
    ///
    /// let tree: AvlTree<u32> = AvlTree::new();
    /// ```
    pub fn new() -> Self {
        AvlTree {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Constructs a new, empty `AvlTree<T>` with room for `capacity` keys before its node
    /// storage reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        AvlTree {
            arena: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of keys in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every key from the tree. Nodes are released in post-order, so every node outlives
    /// its children.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// ```
    pub fn clear(&mut self) {
        if self.root.is_some() {
            debug!("clearing avl tree with {} nodes", self.len());
        }
        let mut cursor = PostorderCursor::new(&self.arena, self.root.take());
        while let Some(handle) = cursor.advance(&self.arena) {
            self.arena.free(handle);
        }
        self.arena.clear();
    }

    /// Returns the minimum key of the tree, or `None` if the tree is empty.
    pub fn min(&self) -> Option<&T> {
        self.root
            .map(|root| &self.arena[extreme(&self.arena, root, Side::Left)].key)
    }

    /// Returns the maximum key of the tree, or `None` if the tree is empty.
    pub fn max(&self) -> Option<&T> {
        self.root
            .map(|root| &self.arena[extreme(&self.arena, root, Side::Right)].key)
    }

    /// Returns an iterator over the tree in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
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
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlTree;
    ///
    /// let tree: AvlTree<u32> = vec![2, 1, 3].into_iter().collect();
    /// assert_eq!(tree.postorder().collect::<Vec<&u32>>(), vec![&1, &3, &2]);
    /// ```
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

impl<T> AvlTree<T>
where
    T: Ord,
{
    /// Inserts a key into the tree. Returns `false` and leaves the tree unchanged if an equal key
    /// already exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> bool {
        tree::insert(&mut self.arena, &mut self.root, Node::new(key))
    }

    /// Removes a key from the tree. Returns `false` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
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
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1);
    /// assert!(!tree.contains(&0));
    /// assert!(tree.contains(&1));
    /// ```
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
    /// use balanced_collections::avl_tree::AvlTree;
    /// use balanced_collections::red_black_tree::RedBlackTree;
    ///
    /// let left: AvlTree<u32> = vec![1, 2, 3].into_iter().collect();
    /// let right: RedBlackTree<u32> = vec![2, 3, 4].into_iter().collect();
    ///
    /// let both = left.intersect(&right);
    /// assert_eq!(both.iter().collect::<Vec<&u32>>(), vec![&2, &3]);
    /// ```
    pub fn intersect<'a, I>(&self, other: I) -> Self
    where
        T: Clone + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        ordered_set::intersection(self.iter(), other)
    }

    /// Recomputes ordering, parent links and balance factors from the node links.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlTree;
    ///
    /// let tree: AvlTree<u32> = (0..100).collect();
    /// assert_eq!(tree.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        let result = self.check();
        if let Err(ref error) = result {
            debug!("avl tree failed validation: {}", error);
        }
        result
    }

    /// Returns `true` if `validate` finds no broken invariant.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    fn check(&self) -> Result<(), ValidationError> {
        validate::check_parents(&self.arena, self.root, self.postorder_handles())?;
        let count = validate::check_order(&self.arena, self.inorder_handles())?;
        validate::check_count(&self.arena, count)?;
        validate::check_heights(&self.arena, self.postorder_handles())
    }
}

impl<T> Drop for AvlTree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for AvlTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> OrderedSet<T> for AvlTree<T>
where
    T: Ord,
{
    fn insert(&mut self, key: T) -> bool {
        AvlTree::insert(self, key)
    }

    fn remove(&mut self, key: &T) -> bool {
        AvlTree::remove(self, key)
    }

    fn contains(&self, key: &T) -> bool {
        AvlTree::contains(self, key)
    }

    fn clear(&mut self) {
        AvlTree::clear(self)
    }

    fn len(&self) -> usize {
        AvlTree::len(self)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        AvlTree::validate(self)
    }
}

impl<T> FromIterator<T> for AvlTree<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for AvlTree<T>
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

impl<'a, T> IntoIterator for &'a AvlTree<T>
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
    use super::AvlTree;
    use crate::error::ValidationError;
    use std::mem;

    #[test]
    fn test_len_empty() {
        let tree: AvlTree<u32> = AvlTree::new();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert!(tree.is_valid());
    }

    #[test]
    fn test_min_max_empty() {
        let tree: AvlTree<u32> = AvlTree::new();
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
    }

    #[test]
    fn test_insert() {
        let mut tree = AvlTree::new();
        assert!(tree.insert(1));
        assert!(tree.contains(&1));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_insert_replace() {
        let mut tree = AvlTree::new();
        assert!(tree.insert(1));
        assert!(!tree.insert(1));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut tree = AvlTree::new();
        tree.insert(1);
        assert!(tree.remove(&1));
        assert!(!tree.contains(&1));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_remove_borrowed() {
        let mut tree = AvlTree::new();
        tree.insert(String::from("a"));
        assert!(tree.contains("a"));
        assert!(tree.remove("a"));
        assert!(!tree.contains("a"));
    }

    #[test]
    fn test_min_max() {
        let tree: AvlTree<u32> = vec![3, 1, 5, 4].into_iter().collect();
        assert_eq!(tree.min(), Some(&1));
        assert_eq!(tree.max(), Some(&5));
    }

    #[test]
    fn test_iter() {
        let tree: AvlTree<u32> = vec![1, 5, 3].into_iter().collect();
        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
    }

    #[test]
    fn test_postorder() {
        let tree: AvlTree<u32> = (1..8).collect();
        assert_eq!(
            tree.postorder().collect::<Vec<&u32>>(),
            vec![&1, &3, &2, &5, &7, &6, &4],
        );
    }

    #[test]
    fn test_clear_then_reuse() {
        let mut tree: AvlTree<u32> = (0..10).collect();
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.insert(5));
        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&5]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut tree: AvlTree<u32> = (0..10).collect();
        let copy = tree.clone();
        tree.remove(&3);
        assert!(copy.contains(&3));
        assert_eq!(copy.len(), 10);
        assert!(copy.is_valid());
    }

    #[test]
    fn test_take_leaves_empty_tree() {
        let mut tree: AvlTree<u32> = (0..10).collect();
        let moved = mem::take(&mut tree);
        assert!(tree.is_empty());
        assert_eq!(moved.len(), 10);
        assert!(tree.insert(1));
        assert!(tree.is_valid());
    }

    #[test]
    fn test_validate_detects_bad_balance() {
        let mut tree: AvlTree<u32> = (0..3).collect();
        let root = tree.root.unwrap();
        tree.arena[root].balance = 1;
        assert_eq!(
            tree.validate(),
            Err(ValidationError::BalanceMismatch {
                node: root.index(),
                stored: 1,
                computed: 0,
            }),
        );
    }

    #[test]
    fn test_validate_detects_bad_parent() {
        let mut tree: AvlTree<u32> = (0..3).collect();
        let root = tree.root.unwrap();
        let left = tree.arena[root].left.unwrap();
        tree.arena[root].parent = Some(left);
        assert_eq!(
            tree.validate(),
            Err(ValidationError::ParentMismatch { node: root.index() }),
        );
    }

    #[test]
    fn test_debug() {
        let tree: AvlTree<u32> = vec![2, 1].into_iter().collect();
        assert_eq!(format!("{:?}", tree), "{1, 2}");
    }
}
