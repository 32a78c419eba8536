use std::iter::FusedIterator;

use crate::{NodeId, OrderedIndex};

impl<V> OrderedIndex<V> {
    /// Gets an iterator over the entries of the index, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbindex::OrderedIndex;
    ///
    /// let mut a = OrderedIndex::new();
    /// a.put(3, "c");
    /// a.put(1, "a");
    /// a.put(2, "b");
    ///
    /// let entries: Vec<_> = a.iter().collect();
    /// assert_eq!(entries, [(1, &"a"), (2, &"b"), (3, &"c")]);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            index: self,
            first: self.first_node(),
            last: self.last_node(),
            len: self.len,
        }
    }

    /// Gets an iterator over the keys of the index, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbindex::OrderedIndex;
    ///
    /// let mut a = OrderedIndex::new();
    /// a.put(2, "b");
    /// a.put(1, "a");
    ///
    /// let keys: Vec<i64> = a.keys().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the index, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbindex::OrderedIndex;
    ///
    /// let mut a = OrderedIndex::new();
    /// a.put(1, "hello");
    /// a.put(2, "goodbye");
    ///
    /// let values: Vec<&str> = a.values().cloned().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    pub fn values(&self) -> Values<'_, V> {
        Values { inner: self.iter() }
    }
}

pub struct Iter<'a, V> {
    index: &'a OrderedIndex<V>,
    first: Option<NodeId>,
    last: Option<NodeId>,
    len: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (i64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let id = self.first?;
        self.len -= 1;
        self.first = self.index.next_node(id);
        Some(self.index.entry(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }

    fn min(mut self) -> Option<Self::Item>
    where
        (i64, &'a V): Ord,
    {
        self.next()
    }

    fn max(mut self) -> Option<Self::Item>
    where
        (i64, &'a V): Ord,
    {
        self.next_back()
    }
}

impl<'a, V> DoubleEndedIterator for Iter<'a, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let id = self.last?;
        self.len -= 1;
        self.last = self.index.prev_node(id);
        Some(self.index.entry(id))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Iter {
            index: self.index,
            first: self.first,
            last: self.last,
            len: self.len,
        }
    }
}

impl<'a, V> IntoIterator for &'a OrderedIndex<V> {
    type Item = (i64, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<V> Iterator for Keys<'_, V> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Keys<'_, V> {
    fn next_back(&mut self) -> Option<i64> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<V> FusedIterator for Keys<'_, V> {}

pub struct Values<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, V> DoubleEndedIterator for Values<'a, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<V> FusedIterator for Values<'_, V> {}

/// An owning iterator over the entries of an [`OrderedIndex`], sorted by key.
pub struct IntoIter<V>(OrderedIndex<V>);

impl<V> IntoIterator for OrderedIndex<V> {
    type Item = (i64, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> IntoIter<V> {
        IntoIter(self)
    }
}

impl<V> Iterator for IntoIter<V> {
    type Item = (i64, V);

    fn next(&mut self) -> Option<(i64, V)> {
        self.0.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<V> DoubleEndedIterator for IntoIter<V> {
    fn next_back(&mut self) -> Option<(i64, V)> {
        self.0.pop_last()
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {
    fn len(&self) -> usize {
        self.0.len
    }
}

impl<V> FusedIterator for IntoIter<V> {}
