#![forbid(unsafe_code)]

//! [`ObservableList`]: an observable adapter over a backing sequence.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Range;
use std::rc::Rc;

use crate::error::{PropertyError, Result};
use crate::event::EventListener;
use crate::observable::{ChangeListener, ListenerId, Observable, ObservableCore, Slots};

/// A growable, indexable container that can back an [`ObservableList`].
///
/// Index arguments are pre-validated by the adapter: `insert` receives
/// `index <= len` and `remove` receives `index < len`.
pub trait Sequence<E>: Clone + PartialEq + Default {
    fn len(&self) -> usize;
    fn get(&self, index: usize) -> Option<&E>;
    fn get_mut(&mut self, index: usize) -> Option<&mut E>;
    fn push(&mut self, item: E);
    fn insert(&mut self, index: usize, item: E);
    fn remove(&mut self, index: usize) -> Option<E>;
    fn clear(&mut self);
    fn retain(&mut self, keep: &mut dyn FnMut(&E) -> bool);
    fn position(&self, matches: &dyn Fn(&E) -> bool) -> Option<usize>;
    fn rposition(&self, matches: &dyn Fn(&E) -> bool) -> Option<usize>;
    fn to_vec(&self) -> Vec<E>;
}

impl<E: Clone + PartialEq> Sequence<E> for Vec<E> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<&E> {
        self.as_slice().get(index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut E> {
        self.as_mut_slice().get_mut(index)
    }

    fn push(&mut self, item: E) {
        Vec::push(self, item);
    }

    fn insert(&mut self, index: usize, item: E) {
        Vec::insert(self, index, item);
    }

    fn remove(&mut self, index: usize) -> Option<E> {
        (index < Vec::len(self)).then(|| Vec::remove(self, index))
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn retain(&mut self, keep: &mut dyn FnMut(&E) -> bool) {
        Vec::retain(self, |item| keep(item));
    }

    fn position(&self, matches: &dyn Fn(&E) -> bool) -> Option<usize> {
        self.iter().position(matches)
    }

    fn rposition(&self, matches: &dyn Fn(&E) -> bool) -> Option<usize> {
        self.iter().rposition(matches)
    }

    fn to_vec(&self) -> Vec<E> {
        self.clone()
    }
}

impl<E: Clone + PartialEq> Sequence<E> for VecDeque<E> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn get(&self, index: usize) -> Option<&E> {
        VecDeque::get(self, index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut E> {
        VecDeque::get_mut(self, index)
    }

    fn push(&mut self, item: E) {
        self.push_back(item);
    }

    fn insert(&mut self, index: usize, item: E) {
        VecDeque::insert(self, index, item);
    }

    fn remove(&mut self, index: usize) -> Option<E> {
        VecDeque::remove(self, index)
    }

    fn clear(&mut self) {
        VecDeque::clear(self);
    }

    fn retain(&mut self, keep: &mut dyn FnMut(&E) -> bool) {
        VecDeque::retain(self, |item| keep(item));
    }

    fn position(&self, matches: &dyn Fn(&E) -> bool) -> Option<usize> {
        self.iter().position(matches)
    }

    fn rposition(&self, matches: &dyn Fn(&E) -> bool) -> Option<usize> {
        self.iter().rposition(matches)
    }

    fn to_vec(&self) -> Vec<E> {
        self.iter().cloned().collect()
    }
}

/// An observable list delegating to a backing [`Sequence`].
///
/// All methods take `&self`; the backing container lives in a `RefCell`.
/// Closures handed to [`with`](Self::with), [`with_mut`](Self::with_mut) and
/// [`retain`](Self::retain) run while the container is borrowed and must
/// not access the same list. [`extend`](Self::extend) and
/// [`replace_all`](Self::replace_all) drain their input before borrowing,
/// so an iterator that reads the list is fine.
///
/// # Panics
///
/// Re-entrant access from inside those closures panics (RefCell borrow
/// rules). Change listeners run with no borrow held and may use the list
/// freely.
pub struct ObservableList<E: 'static, B: 'static = Vec<E>> {
    items: RefCell<B>,
    core: ObservableCore<B>,
    _marker: PhantomData<E>,
}

impl<E, B> ObservableList<E, B>
where
    E: Clone + PartialEq + 'static,
    B: Sequence<E> + 'static,
{
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::from_backing(B::default())
    }

    /// Wrap an existing container. Its current contents are the baseline
    /// for the first update.
    #[must_use]
    pub fn from_backing(backing: B) -> Self {
        Self {
            core: ObservableCore::new(backing.clone()),
            items: RefCell::new(backing),
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clone of the element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<E> {
        self.items.borrow().get(index).cloned()
    }

    #[must_use]
    pub fn contains(&self, item: &E) -> bool {
        self.index_of(item).is_some()
    }

    /// Index of the first element equal to `item`.
    #[must_use]
    pub fn index_of(&self, item: &E) -> Option<usize> {
        self.items.borrow().position(&|e| e == item)
    }

    /// Index of the last element equal to `item`.
    #[must_use]
    pub fn last_index_of(&self, item: &E) -> Option<usize> {
        self.items.borrow().rposition(&|e| e == item)
    }

    /// Append an element.
    pub fn push(&self, item: E) {
        self.items.borrow_mut().push(item);
    }

    /// Insert `item` at `index`, shifting later elements.
    pub fn insert(&self, index: usize, item: E) -> Result<()> {
        let mut items = self.items.borrow_mut();
        let len = items.len();
        if index > len {
            return Err(PropertyError::IndexOutOfBounds { index, len });
        }
        items.insert(index, item);
        Ok(())
    }

    /// Remove and return the element at `index`.
    pub fn remove(&self, index: usize) -> Result<E> {
        let mut items = self.items.borrow_mut();
        let len = items.len();
        items
            .remove(index)
            .ok_or(PropertyError::IndexOutOfBounds { index, len })
    }

    /// Remove the first element equal to `item`. Returns whether one was
    /// found.
    pub fn remove_item(&self, item: &E) -> bool {
        self.remove_where(|e| e == item).is_some()
    }

    /// Remove and return the first element matching `matches`.
    pub fn remove_where(&self, matches: impl Fn(&E) -> bool) -> Option<E> {
        let mut items = self.items.borrow_mut();
        let index = items.position(&matches)?;
        items.remove(index)
    }

    /// Replace the element at `index`, returning the previous one.
    pub fn set(&self, index: usize, item: E) -> Result<E> {
        let mut items = self.items.borrow_mut();
        let len = items.len();
        let slot = items
            .get_mut(index)
            .ok_or(PropertyError::IndexOutOfBounds { index, len })?;
        Ok(std::mem::replace(slot, item))
    }

    pub fn clear(&self) {
        self.items.borrow_mut().clear();
    }

    /// Append every element of `items`.
    pub fn extend(&self, items: impl IntoIterator<Item = E>) {
        let items: Vec<E> = items.into_iter().collect();
        let mut backing = self.items.borrow_mut();
        for item in items {
            backing.push(item);
        }
    }

    /// Keep only the elements for which `keep` returns `true`. Returns the
    /// number of elements removed.
    pub fn retain(&self, mut keep: impl FnMut(&E) -> bool) -> usize {
        let mut items = self.items.borrow_mut();
        let before = items.len();
        items.retain(&mut keep);
        before - items.len()
    }

    /// Clear the list and repopulate it from `items`.
    ///
    /// Listeners observe one change from the old contents to the new ones
    /// on the next update, not a sequence of element events.
    pub fn replace_all(&self, items: impl IntoIterator<Item = E>) {
        let items: Vec<E> = items.into_iter().collect();
        let mut backing = self.items.borrow_mut();
        backing.clear();
        for item in items {
            backing.push(item);
        }
    }

    /// Copy of the elements in `range`.
    pub fn sub_list(&self, range: Range<usize>) -> Result<Vec<E>> {
        if range.start > range.end {
            return Err(PropertyError::InvalidArgument {
                argument: "range",
                reason: format!("start {} exceeds end {}", range.start, range.end),
            });
        }
        let items = self.items.borrow();
        let len = items.len();
        if range.end > len {
            return Err(PropertyError::IndexOutOfBounds {
                index: range.end,
                len,
            });
        }
        Ok(range.filter_map(|i| items.get(i).cloned()).collect())
    }

    /// Copy of all elements in order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<E> {
        self.items.borrow().to_vec()
    }

    /// Borrow the backing container.
    pub fn with<R>(&self, f: impl FnOnce(&B) -> R) -> R {
        f(&self.items.borrow())
    }

    /// Mutably borrow the backing container.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut B) -> R) -> R {
        f(&mut self.items.borrow_mut())
    }
}

impl<E, B> Default for ObservableList<E, B>
where
    E: Clone + PartialEq + 'static,
    B: Sequence<E> + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone + PartialEq + 'static> FromIterator<E> for ObservableList<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::from_backing(iter.into_iter().collect())
    }
}

impl<E, B> Observable<B> for ObservableList<E, B>
where
    E: Clone + PartialEq + 'static,
    B: Sequence<E> + 'static,
{
    fn add_listener(&self, listener: Rc<dyn ChangeListener<B>>) -> ListenerId {
        self.core.add_listener(listener)
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        self.core.remove_listener(id)
    }

    fn listeners(&self) -> Vec<Rc<dyn ChangeListener<B>>> {
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
        let _span = tracing::trace_span!("list_update", len = self.len()).entered();

        let current = self.items.borrow().clone();
        self.core.observe(self, current);
        Ok(())
    }
}

/// Lets a list serve as a property's registry storage.
impl<E, B> Slots<E> for ObservableList<E, B>
where
    E: Clone + PartialEq + 'static,
    B: Sequence<E> + 'static,
{
    fn push_slot(&self, entry: E) {
        self.push(entry);
    }

    fn remove_slot(&self, matches: &dyn Fn(&E) -> bool) -> Option<E> {
        self.remove_where(matches)
    }

    fn snapshot_slots(&self) -> Vec<E> {
        self.snapshot()
    }

    fn slot_count(&self) -> usize {
        self.len()
    }

    fn settle(&self) -> Result<()> {
        self.update()
    }
}

impl<E, B> fmt::Debug for ObservableList<E, B>
where
    E: Clone + PartialEq + 'static,
    B: Sequence<E> + fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableList")
            .field("items", &self.items.borrow())
            .field("listener_count", &self.core.listener_count())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
