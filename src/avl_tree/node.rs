use crate::node::{BinaryNode, HeightBalanced, Link, Side};

/// A node of a parent-linked avl tree.
#[derive(Clone)]
pub struct Node<T> {
    pub key: T,
    pub balance: i8,
    pub left: Link,
    pub right: Link,
    pub parent: Link,
}

impl<T> Node<T> {
    pub fn new(key: T) -> Self {
        Node {
            key,
            balance: 0,
            left: None,
            right: None,
            parent: None,
        }
    }
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

impl<T> HeightBalanced for Node<T> {
    fn balance(&self) -> i8 {
        self.balance
    }

    fn set_balance(&mut self, balance: i8) {
        self.balance = balance;
    }
}
