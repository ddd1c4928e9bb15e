use crate::node::{BinaryNode, HeightBalanced, Link, Side};
use std::cell::Cell;

/// A node of a threaded avl tree. There is no parent link; instead the right link of a node
/// may temporarily point back at an ancestor while a traversal is in progress, so it lives in a
/// `Cell` that a traversal can rewrite through a shared reference.
#[derive(Clone)]
pub struct Node<T> {
    pub key: T,
    pub balance: i8,
    pub left: Link,
    pub right: Cell<Link>,
}

impl<T> Node<T> {
    pub fn new(key: T) -> Self {
        Node {
            key,
            balance: 0,
            left: None,
            right: Cell::new(None),
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
            Side::Right => self.right.get(),
        }
    }

    fn set_child(&mut self, side: Side, link: Link) {
        match side {
            Side::Left => self.left = link,
            Side::Right => self.right.set(link),
        }
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
