use crate::arena::Handle;

/// A possibly absent reference to a node in a tree's arena.
pub type Link = Option<Handle>;

/// One of the two child slots of a binary node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// The change in balance factor when a subtree on this side grows by one level.
    pub fn sign(self) -> i8 {
        match self {
            Side::Left => -1,
            Side::Right => 1,
        }
    }
}

/// Structural access shared by every node flavor.
///
/// Nodes without a parent back-reference keep the default `parent` and `set_parent`, which makes
/// the generic rotation code skip the parent bookkeeping entirely.
pub trait BinaryNode {
    type Key;

    fn key(&self) -> &Self::Key;

    fn child(&self, side: Side) -> Link;

    fn set_child(&mut self, side: Side, link: Link);

    fn parent(&self) -> Link {
        None
    }

    fn set_parent(&mut self, _parent: Link) {}
}

/// A node that stores a balance factor: height(right) - height(left).
pub trait HeightBalanced: BinaryNode {
    fn balance(&self) -> i8;

    fn set_balance(&mut self, balance: i8);
}

#[cfg(test)]
mod tests {
    use super::Side;

    #[test]
    fn test_opposite() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
    }

    #[test]
    fn test_sign() {
        assert_eq!(Side::Left.sign(), -1);
        assert_eq!(Side::Right.sign(), 1);
        assert_eq!(Side::Left.sign(), -Side::Left.opposite().sign());
    }
}
