//! Self-balancing binary search tree where the heights of the two child subtrees of any node
//! differ by at most one. Nodes keep a link to their parent, which drives both retracing after
//! a removal and iteration.

mod iter;
pub(crate) mod node;
mod set;
pub(crate) mod tree;

pub use self::iter::{Iter, Postorder};
pub use self::set::AvlTree;
