//! Slab storage for tree nodes.

use std::mem;
use std::ops::{Index, IndexMut};

/// A handle to an object stored in an `Arena<T>`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    index: usize,
}

impl Handle {
    // Never handed out by an arena. The threaded post-order walk uses it to name its synthetic
    // root.
    pub(crate) const ANCHOR: Handle = Handle { index: usize::MAX };

    /// Returns the slot index of the handle.
    pub fn index(self) -> usize {
        self.index
    }
}

#[derive(Clone)]
enum Block<T> {
    Occupied(T),
    Vacant(Option<usize>),
}

/// A growable slab that stores a single type of object and hands out `Handle`s to them.
///
/// Freed slots are threaded onto a free list and reused by later allocations, so a handle is
/// only meaningful until the object it refers to is freed. All remaining objects are dropped
/// when the arena is dropped. The arena contains no unsafe code: it is a `Vec` of blocks.
///
/// # Examples
///
/// ```
/// use balanced_collections::arena::Arena;
///
/// let mut arena = Arena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// assert!(arena.is_empty());
/// ```
#[derive(Clone)]
pub struct Arena<T> {
    blocks: Vec<Block<T>>,
    head: Option<usize>,
    len: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::new();
    /// ```
    pub fn new() -> Self {
        Arena {
            blocks: Vec::new(),
            head: None,
            len: 0,
        }
    }

    /// Constructs a new, empty `Arena<T>` with room for `capacity` objects before it
    /// reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            blocks: Vec::with_capacity(capacity),
            head: None,
            len: 0,
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots, live or vacant, that the arena has created. Every handle
    /// the arena has returned has an index smaller than this.
    pub fn slots(&self) -> usize {
        self.blocks.len()
    }

    /// Allocates an object in the arena and returns its handle. A previously freed slot is
    /// reused when one is available.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// arena.free(x);
    /// assert_eq!(arena.allocate(1), x);
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;
        match self.head.take() {
            None => {
                self.blocks.push(Block::Occupied(value));
                Handle {
                    index: self.blocks.len() - 1,
                }
            },
            Some(index) => {
                match mem::replace(&mut self.blocks[index], Block::Occupied(value)) {
                    Block::Vacant(next) => self.head = next,
                    Block::Occupied(_) => panic!("Error: free list points at an occupied block."),
                }
                Handle { index }
            },
        }
    }

    /// Deallocates an object in the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `handle` refers to an invalid or vacant slot.
    pub fn free(&mut self, handle: Handle) -> T {
        if handle.index >= self.blocks.len() {
            panic!("Error: attempting to free invalid block.");
        }
        let old_block = mem::replace(&mut self.blocks[handle.index], Block::Vacant(self.head));
        match old_block {
            Block::Occupied(value) => {
                self.head = Some(handle.index);
                self.len -= 1;
                value
            },
            Block::Vacant(next) => {
                self.blocks[handle.index] = Block::Vacant(next);
                panic!("Error: attempting to free vacant block.");
            },
        }
    }

    /// Returns an immutable reference to an object in the arena, or `None` if the handle does
    /// not refer to a live object.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.blocks.get(handle.index) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the arena, or `None` if the handle does not
    /// refer to a live object.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.blocks.get_mut(handle.index) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Drops every object and releases all slots.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.head = None;
        self.len = 0;
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Handle> for Arena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for Arena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle out of bounds.")
    }
}
