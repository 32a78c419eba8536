//! An ordered in-memory index over `i64` keys, implemented as a red-black
//! tree whose nodes live in a [`slab::Slab`] arena.
//!
//! Child and parent links are arena ids rather than pointers: children are
//! owned through the arena, and the parent link is only ever used to walk
//! back up during rotations, fixups and cursor steps.
//!
//! ```
//! use rbindex::OrderedIndex;
//!
//! let mut index = OrderedIndex::new();
//! index.put(7, "seven");
//! index.put(1, "one");
//! index.put(3, "three");
//!
//! assert_eq!(index.get(3), Some(&"three"));
//! assert_eq!(index.floor(5), Some((3, &"three")));
//! assert_eq!(index.ceiling(5), Some((7, &"seven")));
//!
//! let mut cursor = index.cursor();
//! let mut keys = Vec::new();
//! while cursor.next() {
//!     keys.push(cursor.key());
//! }
//! assert_eq!(keys, [1, 3, 7]);
//! ```
mod cursor;
mod error;
mod iter;
mod node;
mod render;
mod root;
mod tree;
mod validate;

use slab::Slab;

pub use cursor::{Cursor, Position};
pub use error::{Error, Result};
pub use iter::{IntoIter, Iter, Keys, Values};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Which child slot of a parent a node hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline(always)]
    pub(crate) fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A stable handle to a node slot in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Debug, Clone)]
pub(crate) struct Node<V> {
    pub(crate) key: i64,
    pub(crate) value: V,
    pub(crate) color: Color,
    // Back-reference used for navigation only; the arena owns every node.
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

/// An ordered map from `i64` keys to values of type `V`.
///
/// Lookups, insertions and removals are `O(log n)`. The index is not
/// synchronized; share it behind a lock if more than one thread needs it.
#[derive(Clone)]
pub struct OrderedIndex<V> {
    nodes: Slab<Node<V>>,
    root: Option<NodeId>,
    len: usize,
}

#[cfg(test)]
pub(crate) fn init_test_logging() {
    use simplelog::{Config, LevelFilter, TestLogger};
    // Only the first call installs the logger.
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}
