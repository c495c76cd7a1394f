#![forbid(unsafe_code)]

//! Pull-based change detection with listener registries.
//!
//! # Design
//!
//! An [`Observable<T>`] remembers the value it saw on the previous
//! [`update()`](Observable::update). Each update reads the current value,
//! compares it against the remembered one with [`equals`], notifies every
//! registered [`ChangeListener`] with the `(old, new)` pair when they
//! differ, and then remembers the current value unconditionally.
//!
//! Nothing happens between updates: setting a property's value is
//! invisible to listeners until the caller's loop calls `update()`.
//!
//! [`ObservableCore`] is the reusable implementation. Its two registries
//! are generic over [`Slots`], so a property can keep its listeners in an
//! [`ObservableList`](crate::collections::ObservableList) while the list
//! itself uses plain `RefCell<Vec<_>>` storage.
//!
//! # Invariants
//!
//! 1. After `observe()`, the remembered value equals the value passed in.
//! 2. Listeners run in registration order and all see the same pair.
//! 3. The registry is snapshotted before notifying: registrations made by a
//!    listener take effect on the next cycle.
//! 4. No `RefCell` borrow is held while a listener runs, so listeners may
//!    read, write, or re-register on the observable that called them.
//! 5. Event listeners are stored only. `update()` never fires them; the
//!    caller decides when to [`execute`](crate::event::EventListener::execute).
//!
//! # Failure Modes
//!
//! - Listener panic: propagates to the caller of `update()`. Later listeners
//!   in the same pass do not run and the remembered value is not advanced,
//!   so the next update reports the change again.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::equality::equals;
use crate::error::Result;
use crate::event::EventListener;

/// Identifier handed out on registration, used for removal.
pub type ListenerId = u64;

/// Response to a value change detected by [`Observable::update`].
pub trait ChangeListener<T: 'static> {
    /// Called once per update in which the observed value changed.
    fn changed(&self, observable: &dyn Observable<T>, old: &T, new: &T);
}

impl<T: 'static, F> ChangeListener<T> for F
where
    F: Fn(&dyn Observable<T>, &T, &T),
{
    fn changed(&self, observable: &dyn Observable<T>, old: &T, new: &T) {
        self(observable, old, new)
    }
}

/// Wrap a closure as a shareable change listener.
pub fn change_listener<T: 'static>(
    f: impl Fn(&dyn Observable<T>, &T, &T) + 'static,
) -> Rc<dyn ChangeListener<T>> {
    Rc::new(f)
}

/// A value whose changes are detected on explicit [`update`](Self::update)
/// calls.
pub trait Observable<T: 'static> {
    /// Register a change listener. Listeners run in registration order.
    fn add_listener(&self, listener: Rc<dyn ChangeListener<T>>) -> ListenerId;

    /// Remove the listener registered under `id`. Returns `false` when no
    /// such listener exists.
    fn remove_listener(&self, id: ListenerId) -> bool;

    /// Snapshot of the registered change listeners.
    fn listeners(&self) -> Vec<Rc<dyn ChangeListener<T>>>;

    /// Store an event listener alongside this observable.
    ///
    /// The registry is inert: `update()` never executes these listeners.
    fn add_event_listener(&self, listener: Rc<EventListener>) -> ListenerId;

    /// Remove the event listener registered under `id`.
    fn remove_event_listener(&self, id: ListenerId) -> bool;

    /// Snapshot of the stored event listeners.
    fn event_listeners(&self) -> Vec<Rc<EventListener>>;

    /// Run one change-detection cycle.
    fn update(&self) -> Result<()>;

    /// Register a closure as a change listener.
    fn on_change<F>(&self, f: F) -> ListenerId
    where
        Self: Sized,
        F: Fn(&dyn Observable<T>, &T, &T) + 'static,
    {
        self.add_listener(Rc::new(f))
    }
}

/// A registry entry: a listener tagged with its [`ListenerId`].
///
/// Entries compare by id only, which is what lets them live in an
/// [`ObservableList`](crate::collections::ObservableList).
#[derive(Clone)]
pub struct Registered<L> {
    id: ListenerId,
    item: L,
}

impl<L> Registered<L> {
    #[must_use]
    pub fn new(id: ListenerId, item: L) -> Self {
        Self { id, item }
    }

    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    #[must_use]
    pub fn item(&self) -> &L {
        &self.item
    }
}

impl<L> PartialEq for Registered<L> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<L> fmt::Debug for Registered<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registered").field("id", &self.id).finish()
    }
}

/// Registry entry for change listeners.
pub type ListenerEntry<T> = Registered<Rc<dyn ChangeListener<T>>>;

/// Registry entry for event listeners.
pub type EventEntry = Registered<Rc<EventListener>>;

/// Unobserved registry storage.
pub type PlainSlots<E> = RefCell<Vec<E>>;

/// Ordered storage backing a listener registry.
///
/// Every method takes `&self` and must not hold a borrow once it returns.
pub trait Slots<E> {
    /// Append an entry.
    fn push_slot(&self, entry: E);

    /// Remove and return the first entry matching `matches`.
    fn remove_slot(&self, matches: &dyn Fn(&E) -> bool) -> Option<E>;

    /// Copy of all entries in order.
    fn snapshot_slots(&self) -> Vec<E>;

    fn slot_count(&self) -> usize;

    /// Flush any change notifications the storage itself produces.
    fn settle(&self) -> Result<()> {
        Ok(())
    }
}

impl<E: Clone> Slots<E> for RefCell<Vec<E>> {
    fn push_slot(&self, entry: E) {
        self.borrow_mut().push(entry);
    }

    fn remove_slot(&self, matches: &dyn Fn(&E) -> bool) -> Option<E> {
        let mut entries = self.borrow_mut();
        let index = entries.iter().position(|e| matches(e))?;
        Some(entries.remove(index))
    }

    fn snapshot_slots(&self) -> Vec<E> {
        self.borrow().clone()
    }

    fn slot_count(&self) -> usize {
        self.borrow().len()
    }
}

/// Reusable implementation of the [`Observable`] contract.
///
/// Owners supply the current value to [`observe`](Self::observe) and
/// forward the registry methods.
pub struct ObservableCore<T: 'static, L = PlainSlots<ListenerEntry<T>>, E = PlainSlots<EventEntry>> {
    last_value: RefCell<T>,
    listeners: L,
    event_listeners: E,
    next_id: Cell<ListenerId>,
}

impl<T: Clone + PartialEq + 'static> ObservableCore<T> {
    /// Create a core with plain registries. `initial` is the value the first
    /// update compares against, so construction never counts as a change.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::with_slots(initial, RefCell::default(), RefCell::default())
    }
}

impl<T, L, E> ObservableCore<T, L, E>
where
    T: Clone + PartialEq + 'static,
    L: Slots<ListenerEntry<T>>,
    E: Slots<EventEntry>,
{
    /// Create a core over caller-supplied registry storage.
    pub fn with_slots(initial: T, listeners: L, event_listeners: E) -> Self {
        Self {
            last_value: RefCell::new(initial),
            listeners,
            event_listeners,
            next_id: Cell::new(1),
        }
    }

    fn next_id(&self) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    pub fn add_listener(&self, listener: Rc<dyn ChangeListener<T>>) -> ListenerId {
        let id = self.next_id();
        self.listeners.push_slot(Registered::new(id, listener));
        id
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove_slot(&|entry| entry.id == id).is_some()
    }

    pub fn listeners(&self) -> Vec<Rc<dyn ChangeListener<T>>> {
        self.listeners
            .snapshot_slots()
            .into_iter()
            .map(|entry| entry.item)
            .collect()
    }

    pub fn add_event_listener(&self, listener: Rc<EventListener>) -> ListenerId {
        let id = self.next_id();
        self.event_listeners.push_slot(Registered::new(id, listener));
        id
    }

    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.event_listeners
            .remove_slot(&|entry| entry.id == id)
            .is_some()
    }

    pub fn event_listeners(&self) -> Vec<Rc<EventListener>> {
        self.event_listeners
            .snapshot_slots()
            .into_iter()
            .map(|entry| entry.item)
            .collect()
    }

    /// Number of registered change listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.slot_count()
    }

    /// Storage backing the change-listener registry.
    pub fn listener_slots(&self) -> &L {
        &self.listeners
    }

    /// Storage backing the event-listener registry.
    pub fn event_slots(&self) -> &E {
        &self.event_listeners
    }

    /// The value remembered from the previous cycle.
    #[must_use]
    pub fn last_value(&self) -> T {
        self.last_value.borrow().clone()
    }

    /// Run change detection against `current`, notifying listeners on
    /// behalf of `observable`. Returns whether a change was reported.
    pub fn observe(&self, observable: &dyn Observable<T>, current: T) -> bool {
        let previous = {
            let last = self.last_value.borrow();
            if equals(&*last, &current) {
                None
            } else {
                Some(last.clone())
            }
        };

        let changed = previous.is_some();
        if let Some(old) = previous {
            // Snapshot so listeners may (un)register without disturbing this pass.
            let entries = self.listeners.snapshot_slots();
            tracing::trace!(listeners = entries.len(), "observable value changed");
            for entry in &entries {
                entry.item.changed(observable, &old, &current);
            }
        }

        *self.last_value.borrow_mut() = current;
        changed
    }

    /// Flush notifications produced by the registries' own storage.
    pub fn settle(&self) -> Result<()> {
        self.listeners.settle()?;
        self.event_listeners.settle()
    }
}

impl<T, L, E> fmt::Debug for ObservableCore<T, L, E>
where
    T: fmt::Debug + 'static,
    L: Slots<ListenerEntry<T>>,
    E: Slots<EventEntry>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableCore")
            .field("last_value", &self.last_value.borrow())
            .field("listener_count", &self.listeners.slot_count())
            .field("event_listener_count", &self.event_listeners.slot_count())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
