//! A repositionable handle for walking an [`OrderedIndex`] in either
//! direction.
//!
//! A cursor borrows the index it walks, so the index cannot be changed while
//! a cursor over it is alive:
//!
//! ```compile_fail
//! use rbindex::OrderedIndex;
//!
//! let mut index = OrderedIndex::new();
//! index.put(1, "one");
//! let mut cursor = index.cursor();
//! cursor.next();
//! index.remove(1);
//! let _ = cursor.key();
//! ```
use crate::{NodeId, OrderedIndex};

/// Where a [`Cursor`] sits relative to the entries of the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    BeforeFirst,
    On,
    AfterLast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeforeFirst,
    On(NodeId),
    AfterLast,
}

pub struct Cursor<'a, V> {
    index: &'a OrderedIndex<V>,
    state: State,
}

impl<V> OrderedIndex<V> {
    /// Returns a cursor positioned before the first entry.
    pub fn cursor(&self) -> Cursor<'_, V> {
        Cursor {
            index: self,
            state: State::BeforeFirst,
        }
    }
}

impl<'a, V> Cursor<'a, V> {
    pub fn position(&self) -> Position {
        match self.state {
            State::BeforeFirst => Position::BeforeFirst,
            State::On(_) => Position::On,
            State::AfterLast => Position::AfterLast,
        }
    }

    /// Moves to the next entry in key order and returns whether there was
    /// one. From before the first entry this lands on the smallest key; past
    /// the largest key the cursor moves after the last entry and stays there.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        let next = match self.state {
            State::BeforeFirst => self.index.first_node(),
            State::On(id) => self.index.next_node(id),
            State::AfterLast => None,
        };
        self.land(next, State::AfterLast)
    }

    /// Moves to the previous entry in key order and returns whether there was
    /// one. The mirror image of [`Cursor::next`].
    pub fn prev(&mut self) -> bool {
        let prev = match self.state {
            State::AfterLast => self.index.last_node(),
            State::On(id) => self.index.prev_node(id),
            State::BeforeFirst => None,
        };
        self.land(prev, State::BeforeFirst)
    }

    /// Resets the cursor to before the first entry.
    pub fn begin(&mut self) {
        self.state = State::BeforeFirst;
    }

    /// Moves the cursor past the last entry.
    pub fn end(&mut self) {
        self.state = State::AfterLast;
    }

    /// Moves to the smallest key, returning `false` if the index is empty.
    pub fn first(&mut self) -> bool {
        self.begin();
        self.next()
    }

    /// Moves to the largest key, returning `false` if the index is empty.
    pub fn last(&mut self) -> bool {
        self.end();
        self.prev()
    }

    /// Moves to the largest key less than or equal to `key`. When there is
    /// none the cursor is left before the first entry.
    pub fn seek_floor(&mut self, key: i64) -> bool {
        let floor = self.index.floor_node(key);
        self.land(floor, State::BeforeFirst)
    }

    /// Moves to the smallest key greater than or equal to `key`. When there
    /// is none the cursor is left after the last entry.
    pub fn seek_ceiling(&mut self, key: i64) -> bool {
        let ceiling = self.index.ceiling_node(key);
        self.land(ceiling, State::AfterLast)
    }

    /// The current entry, or `None` when the cursor is not on one.
    pub fn entry(&self) -> Option<(i64, &'a V)> {
        match self.state {
            State::On(id) => Some(self.index.entry(id)),
            _ => None,
        }
    }

    /// The key of the current entry.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is before the first or after the last entry.
    pub fn key(&self) -> i64 {
        self.entry().expect("cursor is not positioned on an entry").0
    }

    /// The value of the current entry.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is before the first or after the last entry.
    pub fn value(&self) -> &'a V {
        self.entry().expect("cursor is not positioned on an entry").1
    }

    fn land(&mut self, target: Option<NodeId>, otherwise: State) -> bool {
        match target {
            Some(id) => {
                self.state = State::On(id);
                true
            }
            None => {
                self.state = otherwise;
                false
            }
        }
    }
}

impl<V> Clone for Cursor<'_, V> {
    fn clone(&self) -> Self {
        Cursor {
            index: self.index,
            state: self.state,
        }
    }
}
