use std::{cmp::Ordering::*, fmt::Debug, mem, ops::Index};

use log::debug;
use slab::Slab;

use crate::{Direction, NodeId, OrderedIndex};

impl<V> Default for OrderedIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> OrderedIndex<V> {
    pub fn new() -> Self {
        OrderedIndex {
            nodes: Slab::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates an empty index whose arena can hold `capacity` entries before
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedIndex {
            nodes: Slab::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Releases spare arena capacity. Occupied slots are never moved.
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        debug!("clearing index of {} entries", self.len);
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    pub(crate) fn lookup(&self, key: i64) -> Option<NodeId> {
        let mut link = self.root;
        while let Some(id) = link {
            let node = self.node(id);
            link = match key.cmp(&node.key) {
                Equal => return Some(id),
                Less => node.left,
                Greater => node.right,
            };
        }
        None
    }

    pub fn contains_key(&self, key: i64) -> bool {
        self.lookup(key).is_some()
    }

    pub fn get(&self, key: i64) -> Option<&V> {
        self.lookup(key).map(|id| &self.node(id).value)
    }

    pub fn get_mut(&mut self, key: i64) -> Option<&mut V> {
        let id = self.lookup(key)?;
        Some(&mut self.node_mut(id).value)
    }

    /// Inserts `value` under `key`.
    ///
    /// If the key was already present its value is replaced in place and the
    /// old one returned; the shape of the tree is left untouched.
    pub fn put(&mut self, key: i64, value: V) -> Option<V> {
        let mut parent = None;
        let mut direction = Direction::Left;
        let mut link = self.root;
        while let Some(id) = link {
            let node = self.node(id);
            (direction, link) = match key.cmp(&node.key) {
                Equal => return Some(mem::replace(&mut self.node_mut(id).value, value)),
                Less => (Direction::Left, node.left),
                Greater => (Direction::Right, node.right),
            };
            parent = Some(id);
        }

        let id = self.alloc(key, value, parent);
        match parent {
            None => self.root = Some(id),
            Some(parent) => self.set_child(parent, direction, Some(id)),
        }
        self.len += 1;
        self.insert_fixup(id);
        None
    }

    /// Removes `key` and returns its value, or `None` if it was absent.
    pub fn remove(&mut self, key: i64) -> Option<V> {
        let id = self.lookup(key)?;
        let slot = self.unlink(id);
        let node = self.release(slot);
        self.len -= 1;
        Some(node.value)
    }

    /// The entry with the largest key less than or equal to `key`.
    pub fn floor(&self, key: i64) -> Option<(i64, &V)> {
        self.floor_node(key).map(|id| self.entry(id))
    }

    /// The entry with the smallest key greater than or equal to `key`.
    pub fn ceiling(&self, key: i64) -> Option<(i64, &V)> {
        self.ceiling_node(key).map(|id| self.entry(id))
    }

    pub(crate) fn floor_node(&self, key: i64) -> Option<NodeId> {
        let mut floor = None;
        let mut link = self.root;
        while let Some(id) = link {
            let node = self.node(id);
            link = match key.cmp(&node.key) {
                Equal => return Some(id),
                Less => node.left,
                Greater => {
                    floor = Some(id);
                    node.right
                }
            };
        }
        floor
    }

    pub(crate) fn ceiling_node(&self, key: i64) -> Option<NodeId> {
        let mut ceiling = None;
        let mut link = self.root;
        while let Some(id) = link {
            let node = self.node(id);
            link = match key.cmp(&node.key) {
                Equal => return Some(id),
                Less => {
                    ceiling = Some(id);
                    node.left
                }
                Greater => node.right,
            };
        }
        ceiling
    }

    pub fn min(&self) -> Option<(i64, &V)> {
        self.first_node().map(|id| self.entry(id))
    }

    pub fn max(&self) -> Option<(i64, &V)> {
        self.last_node().map(|id| self.entry(id))
    }

    pub fn pop_first(&mut self) -> Option<(i64, V)> {
        let key = self.node(self.first_node()?).key;
        self.remove(key).map(|value| (key, value))
    }

    pub fn pop_last(&mut self) -> Option<(i64, V)> {
        let key = self.node(self.last_node()?).key;
        self.remove(key).map(|value| (key, value))
    }

    #[inline(always)]
    pub(crate) fn entry(&self, id: NodeId) -> (i64, &V) {
        let node = self.node(id);
        (node.key, &node.value)
    }
}

impl<V> Index<i64> for OrderedIndex<V> {
    type Output = V;

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `OrderedIndex`.
    #[inline]
    fn index(&self, key: i64) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<V> FromIterator<(i64, V)> for OrderedIndex<V> {
    fn from_iter<I: IntoIterator<Item = (i64, V)>>(iter: I) -> Self {
        let mut index = OrderedIndex::new();
        index.extend(iter);
        index
    }
}

impl<V> Extend<(i64, V)> for OrderedIndex<V> {
    fn extend<I: IntoIterator<Item = (i64, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<V: Debug> Debug for OrderedIndex<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use super::*;

    use pretty_assertions::assert_eq;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;
    use rand::{Rng, SeedableRng, seq::SliceRandom};
    use rand_chacha::ChaCha8Rng;

    #[derive(Debug, Clone)]
    enum Op {
        Put(i64, u32),
        Remove(i64),
    }

    impl Arbitrary for Op {
        fn arbitrary(g: &mut Gen) -> Self {
            // A narrow key range keeps updates and removals hitting live keys.
            let key = i64::from(i8::arbitrary(g));
            if bool::arbitrary(g) {
                Op::Put(key, u32::arbitrary(g))
            } else {
                Op::Remove(key)
            }
        }
    }

    #[test]
    fn ctor_works() {
        crate::init_test_logging();
        let index = OrderedIndex::<String>::new();
        assert_eq!(None, index.min());
        assert_eq!(0, index.len());
        assert_eq!(true, index.is_empty());
        assert_eq!(false, index.contains_key(42));
        assert_eq!(Ok(1), index.validate());
    }

    #[test]
    fn with_capacity_preallocates() {
        let mut index = OrderedIndex::with_capacity(64);
        assert!(index.capacity() >= 64);
        index.put(1, ());
        index.shrink_to_fit();
        assert!(index.capacity() >= 1);
        assert_eq!(Some(&()), index.get(1));
    }

    #[test]
    fn contains_many() {
        let mut index = OrderedIndex::new();
        assert_eq!(None, index.put(42, "forty two".to_string()));
        assert_eq!(1, index.len());
        assert_eq!(None, index.put(0, "zero".to_string()));
        assert_eq!(2, index.len());
        assert_eq!(None, index.put(100, "hundo".to_string()));
        assert_eq!(3, index.len());

        assert_eq!(true, index.contains_key(42));
        assert_eq!(true, index.contains_key(0));
        assert_eq!(true, index.contains_key(100));
        assert_eq!(false, index.contains_key(1));
        assert_eq!(false, index.contains_key(1000));
    }

    #[test]
    fn min_and_max() {
        let mut index = OrderedIndex::new();
        assert_eq!(None, index.min());
        assert_eq!(None, index.max());

        let forty_two = "forty two".to_string();
        index.put(42, forty_two.clone());
        assert_eq!(Some((42, &forty_two)), index.min());
        assert_eq!(Some((42, &forty_two)), index.max());

        let zero = "zero".to_string();
        let hundo = "hundo".to_string();
        index.put(0, zero.clone());
        index.put(100, hundo.clone());

        assert_eq!(Some((0, &zero)), index.min());
        assert_eq!(Some((100, &hundo)), index.max());
    }

    #[test]
    fn put_multiple_values() {
        let data: Vec<(i64, String)> = (0..100).map(|i| (i, format!("{i}"))).collect();
        let mut index = OrderedIndex::new();
        for (k, v) in data.iter() {
            index.put(*k, v.to_string());
        }

        assert_eq!(data.len(), index.len());
        for (k, v) in data.iter() {
            assert_eq!(true, index.contains_key(*k));
            assert_eq!(Some(v), index.get(*k));
        }
        assert!(index.validate().is_ok());
    }

    #[test]
    fn put_same_key_updates_in_place() {
        let mut index = OrderedIndex::new();
        let forty_two = "forty two".to_string();
        assert_eq!(None, index.put(42, forty_two.clone()));
        index.put(7, "seven".to_string());
        let before = index.to_string();

        assert_eq!(Some(forty_two), index.put(42, "42".to_string()));
        assert_eq!(2, index.len());
        assert_eq!(Some(&"42".to_string()), index.get(42));
        assert_eq!(before, index.to_string());
    }

    #[test]
    fn get_mut_edits_value() {
        let mut index = OrderedIndex::new();
        index.put(1, String::from("hello"));
        if let Some(value) = index.get_mut(1) {
            value.push('!');
        }
        assert_eq!("hello!", index[1]);
        assert_eq!(None, index.get_mut(2));
    }

    #[test]
    fn extreme_keys_are_ordered() {
        let mut index = OrderedIndex::new();
        for key in [0, i64::MAX, i64::MIN, -1, 1, i64::MIN + 1, i64::MAX - 1] {
            index.put(key, ());
        }
        assert_eq!(
            vec![i64::MIN, i64::MIN + 1, -1, 0, 1, i64::MAX - 1, i64::MAX],
            index.keys().collect::<Vec<_>>()
        );
        assert_eq!(Some((i64::MIN, &())), index.floor(i64::MIN));
        assert_eq!(Some((i64::MAX - 1, &())), index.ceiling(2));
        assert_eq!(Some((i64::MAX, &())), index.ceiling(i64::MAX));
        assert_eq!(Some((1, &())), index.floor(i64::MAX - 2));
        assert_eq!(Some((-1, &())), index.ceiling(i64::MIN + 2));
        assert_eq!(Some((-1, &())), index.floor(-1));
        assert!(index.validate().is_ok());
    }

    #[test]
    fn remove_absent_key_is_a_noop() {
        let mut index: OrderedIndex<u8> = [(1, 1), (2, 2)].into_iter().collect();
        assert_eq!(None, index.remove(3));
        assert_eq!(2, index.len());
        assert_eq!(Some(2), index.remove(2));
        assert_eq!(None, index.get(2));
        assert_eq!(1, index.len());
        assert_eq!(None, index.remove(2));
        assert_eq!(1, index.len());
    }

    #[test]
    fn floor_and_ceiling() {
        let index: OrderedIndex<&str> =
            [(1, "a"), (3, "b"), (7, "c"), (9, "d")].into_iter().collect();

        assert_eq!(Some((3, &"b")), index.floor(5));
        assert_eq!(Some((7, &"c")), index.ceiling(5));
        assert_eq!(None, index.floor(0));
        assert_eq!(None, index.ceiling(10));
        assert_eq!(Some((7, &"c")), index.floor(7));
        assert_eq!(Some((7, &"c")), index.ceiling(7));
        assert_eq!(Some((9, &"d")), index.floor(i64::MAX));
        assert_eq!(Some((1, &"a")), index.ceiling(i64::MIN));

        let empty = OrderedIndex::<()>::new();
        assert_eq!(None, empty.floor(0));
        assert_eq!(None, empty.ceiling(0));
    }

    #[test]
    fn pop_first() {
        let mut index = OrderedIndex::new();
        assert_eq!(None, index.pop_first());

        let forty_two = "forty two".to_string();
        index.put(42, forty_two.clone());
        assert_eq!(Some((42, forty_two.clone())), index.pop_first());
        assert_eq!(0, index.len());
        assert_eq!(false, index.contains_key(42));

        let zero = "zero".to_string();
        let hundo = "hundo".to_string();
        index.put(42, forty_two.clone());
        index.put(0, zero.clone());
        index.put(100, hundo.clone());

        assert_eq!(Some((0, zero.clone())), index.pop_first());
        assert_eq!(2, index.len());
        assert_eq!(false, index.contains_key(0));
        assert_eq!(true, index.contains_key(42));
        assert_eq!(true, index.contains_key(100));

        assert_eq!(Some((42, forty_two.clone())), index.pop_first());
        assert_eq!(1, index.len());
        assert_eq!(true, index.contains_key(100));

        assert_eq!(Some((100, hundo.clone())), index.pop_first());
        assert_eq!(0, index.len());
        assert_eq!(None, index.root);
    }

    #[test]
    fn pop_last() {
        let mut index: OrderedIndex<i64> = (0..10).map(|k| (k, k * 10)).collect();
        assert_eq!(Some((9, 90)), index.pop_last());
        assert_eq!(Some((8, 80)), index.pop_last());
        assert_eq!(8, index.len());
        assert_eq!(Some((7, &70)), index.max());
        assert!(index.validate().is_ok());
    }

    #[test]
    fn clear_resets_everything() {
        let mut index: OrderedIndex<()> = (0..32).map(|k| (k, ())).collect();
        index.clear();
        assert_eq!(0, index.len());
        assert!(index.is_empty());
        assert_eq!(None, index.root);
        assert_eq!(None, index.min());
        assert_eq!(Ok(1), index.validate());

        index.put(5, ());
        assert_eq!(vec![5], index.keys().collect::<Vec<_>>());
    }

    #[test]
    fn index_passes() {
        let mut index = OrderedIndex::new();
        let forty_two = "forty two".to_string();
        index.put(42, forty_two.clone());
        assert_eq!(forty_two, index[42]);
    }

    #[test]
    #[should_panic(expected = "no entry found for key")]
    fn index_panics() {
        let index: OrderedIndex<()> = OrderedIndex::new();
        assert_eq!((), index[42]);
    }

    #[test]
    fn debug_lists_entries_in_order() {
        let index: OrderedIndex<&str> = [(2, "b"), (1, "a")].into_iter().collect();
        assert_eq!(r#"{1: "a", 2: "b"}"#, format!("{index:?}"));
    }

    #[test]
    fn clone_is_independent() {
        let mut index: OrderedIndex<i64> = (0..8).map(|k| (k, k)).collect();
        let copy = index.clone();
        index.remove(3);
        assert_eq!(Some(&3), copy.get(3));
        assert_eq!(8, copy.len());
        assert!(copy.validate().is_ok());
    }

    #[test]
    fn seeded_random_workload() {
        crate::init_test_logging();
        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
        let mut keys: Vec<i64> = (0..2_000).collect();
        keys.shuffle(&mut rng);

        let mut index = OrderedIndex::new();
        let mut model = BTreeMap::new();
        for &key in &keys {
            let value = rng.random_range(0..u32::MAX);
            assert_eq!(model.insert(key, value), index.put(key, value));
        }
        assert!(index.validate().is_ok());

        for _ in 0..4_000 {
            let key = rng.random_range(-100..2_100);
            if rng.random_bool(0.5) {
                assert_eq!(model.remove(&key), index.remove(key));
            } else {
                let value = rng.random_range(0..u32::MAX);
                assert_eq!(model.insert(key, value), index.put(key, value));
            }
        }
        assert!(index.validate().is_ok());
        assert_eq!(model.len(), index.len());
        assert!(model.iter().map(|(k, v)| (*k, v)).eq(index.iter()));
    }

    #[quickcheck]
    fn behaves_like_btreemap(ops: Vec<Op>) -> bool {
        let mut index = OrderedIndex::new();
        let mut model = BTreeMap::new();
        for op in ops {
            let agrees = match op {
                Op::Put(key, value) => model.insert(key, value) == index.put(key, value),
                Op::Remove(key) => model.remove(&key) == index.remove(key),
            };
            if !agrees || index.validate().is_err() || model.len() != index.len() {
                return false;
            }
        }
        model.iter().map(|(k, v)| (*k, v)).eq(index.iter())
    }

    #[quickcheck]
    fn put_then_get(key: i64, value: u32) -> bool {
        let mut index = OrderedIndex::new();
        index.put(key, value);
        index.get(key) == Some(&value) && index.len() == 1
    }

    #[quickcheck]
    fn update_keeps_len(keys: Vec<i64>, key: i64) -> bool {
        let mut index: OrderedIndex<u8> = keys.into_iter().map(|k| (k, 0)).collect();
        index.put(key, 1);
        let len = index.len();
        index.put(key, 2);
        index.get(key) == Some(&2) && index.len() == len
    }

    #[quickcheck]
    fn remove_shrinks_by_one(keys: Vec<i64>, key: i64) -> bool {
        let mut index: OrderedIndex<()> = keys.into_iter().map(|k| (k, ())).collect();
        let len = index.len();
        let present = index.contains_key(key);
        index.remove(key);
        let expected = if present { len - 1 } else { len };
        !index.contains_key(key) && index.len() == expected && index.validate().is_ok()
    }

    #[quickcheck]
    fn floor_and_ceiling_match_brute_force(keys: Vec<i16>, probe: i16) -> bool {
        let index: OrderedIndex<()> = keys.iter().map(|&k| (i64::from(k), ())).collect();
        let probe = i64::from(probe);
        let floor = keys.iter().map(|&k| i64::from(k)).filter(|&k| k <= probe).max();
        let ceiling = keys.iter().map(|&k| i64::from(k)).filter(|&k| k >= probe).min();
        index.floor(probe).map(|(k, _)| k) == floor
            && index.ceiling(probe).map(|(k, _)| k) == ceiling
    }
}
