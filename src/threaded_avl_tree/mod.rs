//! Avl tree without parent links. Removal rebalances top-down in a second pass over the search
//! path, and traversal threads the tree (Morris traversal) instead of keeping a stack.

mod iter;
mod node;
mod set;
mod tree;

pub use self::iter::{InorderCursor, Iter, Postorder, PostorderCursor};
pub use self::set::ThreadedAvlTree;
