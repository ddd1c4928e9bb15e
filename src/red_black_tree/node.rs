use crate::arena::Arena;
use crate::node::{BinaryNode, Link, Side};

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// A node of a parent-linked red black tree.
#[derive(Clone)]
pub struct Node<T> {
    pub key: T,
    pub color: Color,
    pub left: Link,
    pub right: Link,
    pub parent: Link,
}

impl<T> Node<T> {
    /// A new node is red and attached below `parent`.
    pub fn new(key: T, parent: Link) -> Self {
        Node {
            key,
            color: Color::Red,
            left: None,
            right: None,
            parent,
        }
    }
}

/// Absent children count as black.
pub fn is_red<T>(arena: &Arena<Node<T>>, link: Link) -> bool {
    link.map_or(false, |handle| arena[handle].color == Color::Red)
}

impl<T> BinaryNode for Node<T> {
    type Key = T;

    fn key(&self) -> &T {
        &self.key
    }

    fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn set_child(&mut self, side: Side, link: Link) {
        match side {
            Side::Left => self.left = link,
            Side::Right => self.right = link,
        }
    }

    fn parent(&self) -> Link {
        self.parent
    }

    fn set_parent(&mut self, parent: Link) {
        self.parent = parent;
    }
}
