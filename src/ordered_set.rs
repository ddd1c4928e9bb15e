//! The capability set shared by every tree in the crate.

use crate::error::ValidationError;
use std::cmp::Ordering;

/// An ordered collection of unique keys.
///
/// `AvlTree`, `RedBlackTree` and `ThreadedAvlTree` are independent implementations of this
/// trait, so code that only needs set semantics can be written once and instantiated with any of
/// them.
///
/// # Examples
///
/// ```
/// use balanced_collections::avl_tree::AvlTree;
/// use balanced_collections::red_black_tree::RedBlackTree;
/// use balanced_collections::OrderedSet;
///
/// fn fill<S: OrderedSet<u32>>() -> S {
///     let mut set = S::default();
///     for key in &[3, 1, 2, 3] {
///         set.insert(*key);
///     }
///     set
/// }
///
/// let avl: AvlTree<u32> = fill();
/// let red_black: RedBlackTree<u32> = fill();
/// assert_eq!(avl.len(), 3);
/// assert_eq!(red_black.len(), 3);
/// assert!(OrderedSet::is_valid(&avl));
/// ```
pub trait OrderedSet<T>: Default
where
    T: Ord,
{
    /// Inserts a key. Returns `false`, leaving the set unchanged, if an equal key is present.
    fn insert(&mut self, key: T) -> bool;

    /// Removes a key. Returns `false` if no equal key is present.
    fn remove(&mut self, key: &T) -> bool;

    fn contains(&self, key: &T) -> bool;

    /// Removes every key.
    fn clear(&mut self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Recomputes the structural invariants of the set from scratch.
    fn validate(&self) -> Result<(), ValidationError>;

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Merges two ascending sequences of keys and collects the keys present in both into a new set.
/// Runs in `O(n + m)` comparisons plus the cost of the insertions.
///
/// # Examples
///
/// ```
/// use balanced_collections::avl_tree::AvlTree;
/// use balanced_collections::ordered_set::intersection;
///
/// let result: AvlTree<u32> = intersection(&[1, 3, 5, 7], &[3, 4, 5]);
/// assert_eq!(result.iter().collect::<Vec<&u32>>(), vec![&3, &5]);
/// ```
pub fn intersection<'a, 'b, T, S, I, J>(left: I, right: J) -> S
where
    T: Ord + Clone + 'a + 'b,
    S: OrderedSet<T>,
    I: IntoIterator<Item = &'a T>,
    J: IntoIterator<Item = &'b T>,
{
    let mut result = S::default();
    let mut left = left.into_iter();
    let mut right = right.into_iter();
    let mut next_left = left.next();
    let mut next_right = right.next();
    while let (Some(l), Some(r)) = (next_left, next_right) {
        match l.cmp(r) {
            Ordering::Less => next_left = left.next(),
            Ordering::Greater => next_right = right.next(),
            Ordering::Equal => {
                result.insert(l.clone());
                next_left = left.next();
                next_right = right.next();
            },
        }
    }
    result
}
