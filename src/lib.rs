//! Height-balanced and color-balanced binary search trees stored in node arenas.
//!
//! Three independent implementations of `OrderedSet<T>` are provided:
//!
//! - `AvlTree`: avl tree with parent links.
//! - `RedBlackTree`: red black tree with parent links.
//! - `ThreadedAvlTree`: avl tree without parent links, traversed by threading.
//!
//! # Examples
//!
//! ```
//! use balanced_collections::avl_tree::AvlTree;
//! use balanced_collections::red_black_tree::RedBlackTree;
//!
//! let avl: AvlTree<i32> = vec![2, 13, 10, 5, 12, 7].into_iter().collect();
//! let red_black: RedBlackTree<i32> = vec![-1, 12, 10, 3, 7].into_iter().collect();
//!
//! let both = avl.intersect(&red_black);
//! assert_eq!(both.iter().collect::<Vec<&i32>>(), vec![&7, &10, &12]);
//! ```

pub mod arena;
pub mod avl_tree;
pub mod error;
mod node;
pub mod ordered_set;
pub mod red_black_tree;
mod rotation;
pub mod threaded_avl_tree;
mod traversal;
mod validate;

pub use crate::error::ValidationError;
pub use crate::ordered_set::OrderedSet;
