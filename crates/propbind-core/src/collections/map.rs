//! [`ObservableMap`]: an observable adapter over a backing map.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;
use std::rc::Rc;

use crate::error::Result;
use crate::event::EventListener;
use crate::observable::{ChangeListener, ListenerId, Observable, ObservableCore};

/// A key-value container that can back an [`ObservableMap`].
pub trait MapBacking<K, V>: Clone + PartialEq + Default {
    fn len(&self) -> usize;
    fn get(&self, key: &K) -> Option<&V>;
    fn contains_key(&self, key: &K) -> bool;
    fn insert(&mut self, key: K, value: V) -> Option<V>;
    fn remove(&mut self, key: &K) -> Option<V>;
    fn clear(&mut self);
    /// Entries in the container's own iteration order.
    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_>;
}

impl<K, V, S> MapBacking<K, V> for HashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone + PartialEq,
    S: BuildHasher + Clone + Default,
{
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn get(&self, key: &K) -> Option<&V> {
        HashMap::get(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        HashMap::contains_key(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        HashMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        HashMap::remove(self, key)
    }

    fn clear(&mut self) {
        HashMap::clear(self);
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.iter())
    }
}

impl<K, V> MapBacking<K, V> for BTreeMap<K, V>
where
    K: Ord + Clone,
    V: Clone + PartialEq,
{
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn get(&self, key: &K) -> Option<&V> {
        BTreeMap::get(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        BTreeMap::contains_key(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        BTreeMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        BTreeMap::remove(self, key)
    }

    fn clear(&mut self) {
        BTreeMap::clear(self);
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.iter())
    }
}

/// An observable map delegating to a backing [`MapBacking`] container.
///
/// Same borrowing rules as [`ObservableList`](super::ObservableList):
/// closures passed to [`with`](Self::with) and [`with_mut`](Self::with_mut)
/// must not touch the same map. Bulk operations drain their input first
/// and accept iterators that read the map.
pub struct ObservableMap<K: 'static, V: 'static, M: 'static = HashMap<K, V>> {
    entries: RefCell<M>,
    core: ObservableCore<M>,
    _marker: PhantomData<(K, V)>,
}

impl<K, V, M> ObservableMap<K, V, M>
where
    K: Clone + 'static,
    V: Clone + PartialEq + 'static,
    M: MapBacking<K, V> + 'static,
{
    #[must_use]
    pub fn new() -> Self {
        Self::from_backing(M::default())
    }

    /// Wrap an existing map. Its contents are the baseline for the first
    /// update.
    #[must_use]
    pub fn from_backing(backing: M) -> Self {
        Self {
            core: ObservableCore::new(backing.clone()),
            entries: RefCell::new(backing),
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.borrow().contains_key(key)
    }

    #[must_use]
    pub fn contains_value(&self, value: &V) -> bool {
        self.entries.borrow().entries().any(|(_, v)| v == value)
    }

    /// Clone of the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.borrow().get(key).cloned()
    }

    /// Store `value` under `key`, returning the value it replaced.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.entries.borrow_mut().insert(key, value)
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.entries.borrow_mut().remove(key)
    }

    /// Insert every pair from `entries`.
    pub fn extend(&self, entries: impl IntoIterator<Item = (K, V)>) {
        let entries: Vec<(K, V)> = entries.into_iter().collect();
        let mut backing = self.entries.borrow_mut();
        for (key, value) in entries {
            backing.insert(key, value);
        }
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// Clear the map and repopulate it; observed as a single change.
    pub fn replace_all(&self, entries: impl IntoIterator<Item = (K, V)>) {
        let entries: Vec<(K, V)> = entries.into_iter().collect();
        let mut backing = self.entries.borrow_mut();
        backing.clear();
        for (key, value) in entries {
            backing.insert(key, value);
        }
    }

    #[must_use]
    pub fn keys(&self) -> Vec<K> {
        self.entries.borrow().entries().map(|(k, _)| k.clone()).collect()
    }

    #[must_use]
    pub fn values(&self) -> Vec<V> {
        self.entries.borrow().entries().map(|(_, v)| v.clone()).collect()
    }

    #[must_use]
    pub fn entries(&self) -> Vec<(K, V)> {
        self.entries
            .borrow()
            .entries()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn with<R>(&self, f: impl FnOnce(&M) -> R) -> R {
        f(&self.entries.borrow())
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut M) -> R) -> R {
        f(&mut self.entries.borrow_mut())
    }
}

impl<K, V, M> Default for ObservableMap<K, V, M>
where
    K: Clone + 'static,
    V: Clone + PartialEq + 'static,
    M: MapBacking<K, V> + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, M> Observable<M> for ObservableMap<K, V, M>
where
    K: Clone + 'static,
    V: Clone + PartialEq + 'static,
    M: MapBacking<K, V> + 'static,
{
    fn add_listener(&self, listener: Rc<dyn ChangeListener<M>>) -> ListenerId {
        self.core.add_listener(listener)
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        self.core.remove_listener(id)
    }

    fn listeners(&self) -> Vec<Rc<dyn ChangeListener<M>>> {
        self.core.listeners()
    }

    fn add_event_listener(&self, listener: Rc<EventListener>) -> ListenerId {
        self.core.add_event_listener(listener)
    }

    fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.core.remove_event_listener(id)
    }

    fn event_listeners(&self) -> Vec<Rc<EventListener>> {
        self.core.event_listeners()
    }

    fn update(&self) -> Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("map_update", len = self.len()).entered();

        let current = self.entries.borrow().clone();
        self.core.observe(self, current);
        Ok(())
    }
}

impl<K, V, M> fmt::Debug for ObservableMap<K, V, M>
where
    K: Clone + 'static,
    V: Clone + PartialEq + 'static,
    M: MapBacking<K, V> + fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableMap")
            .field("entries", &self.entries.borrow())
            .field("listener_count", &self.core.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn hash_map_operations() {
        let map: ObservableMap<&str, i32> = ObservableMap::new();
        assert!(map.is_empty());
        assert_eq!(map.insert("a", 1), None);
        assert_eq!(map.insert("a", 2), Some(1));
        map.extend([("b", 3), ("c", 4)]);

        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&"a"), Some(2));
        assert!(map.contains_key(&"b"));
        assert!(map.contains_value(&4));
        assert!(!map.contains_value(&1));

        assert_eq!(map.remove(&"b"), Some(3));
        assert_eq!(map.remove(&"b"), None);
        let mut keys = map.keys();
        keys.sort_unstable();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn btree_map_keeps_order() {
        let map: ObservableMap<i32, char, BTreeMap<i32, char>> = ObservableMap::new();
        map.extend([(3, 'c'), (1, 'a'), (2, 'b')]);
        assert_eq!(map.keys(), vec![1, 2, 3]);
        assert_eq!(map.values(), vec!['a', 'b', 'c']);
        assert_eq!(map.entries()[0], (1, 'a'));
    }

    #[test]
    fn whole_map_change_detection() {
        let map: ObservableMap<i32, i32, BTreeMap<i32, i32>> =
            ObservableMap::from_backing(BTreeMap::from([(1, 10)]));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        map.on_change(move |_, old: &BTreeMap<i32, i32>, new: &BTreeMap<i32, i32>| {
            sink.borrow_mut().push((old.len(), new.len()));
        });

        map.update().unwrap();
        assert!(seen.borrow().is_empty(), "baseline is the initial contents");

        map.replace_all([(1, 1), (2, 2), (3, 3)]);
        map.update().unwrap();
        assert_eq!(*seen.borrow(), vec![(1, 3)]);
    }

    #[test]
    fn bulk_operations_accept_iterators_over_the_same_map() {
        let map: ObservableMap<i32, i32, BTreeMap<i32, i32>> =
            ObservableMap::from_backing(BTreeMap::from([(1, 10), (2, 20)]));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        map.on_change(move |_, old: &BTreeMap<i32, i32>, new: &BTreeMap<i32, i32>| {
            sink.borrow_mut().push((old.clone(), new.clone()));
        });

        map.replace_all(
            map.keys()
                .into_iter()
                .map(|k| (k, map.get(&k).unwrap_or(0) + 1)),
        );
        assert_eq!(map.entries(), vec![(1, 11), (2, 21)]);

        map.extend((1..=2).map(|k| (k + 2, map.get(&k).unwrap_or(0))));
        assert_eq!(map.len(), 4);
        assert_eq!(map.get(&4), Some(21));

        map.update().unwrap();
        let expected = BTreeMap::from([(1, 11), (2, 21), (3, 11), (4, 21)]);
        assert_eq!(
            *seen.borrow(),
            vec![(BTreeMap::from([(1, 10), (2, 20)]), expected)]
        );
    }

    #[test]
    fn value_edit_is_a_change() {
        let map: ObservableMap<&str, i32> = ObservableMap::new();
        map.insert("k", 1);
        map.update().unwrap();

        let count = Rc::new(Cell::new(0u32));
        let c = Rc::clone(&count);
        map.on_change(move |_, _, _| c.set(c.get() + 1));

        map.with_mut(|m| {
            if let Some(v) = m.get_mut("k") {
                *v = 5;
            }
        });
        map.update().unwrap();
        map.clear();
        map.update().unwrap();
        assert_eq!(count.get(), 2);
    }
}
