#![forbid(unsafe_code)]

//! Precedence-ordered synchronization between two properties.
//!
//! A [`Binding<T>`] keeps a *root* and a *guest* [`Property`] equal. The root
//! owns the binding (it sits in the root's binding list and is updated from
//! the root's [`update()`](crate::observable::Observable::update)); both
//! sides are held weakly, so neither property keeps the other alive.
//!
//! # Reconciliation
//!
//! Each update reads both sides and compares them against the *shadow*
//! values captured at the end of the previous update:
//!
//! | order                    | before sync                                   |
//! |--------------------------|-----------------------------------------------|
//! | `Dominant`               | nothing                                       |
//! | `Recessive`              | nothing                                       |
//! | `BidirectionalDominant`  | push the side that moved, root checked first  |
//! | `BidirectionalRecessive` | push the side that moved, guest checked first |
//!
//! Sync then forces equality: the root's value wins for `Dominant` and
//! `BidirectionalDominant`, the guest's value otherwise. Finally both sides
//! are re-read into the shadows.
//!
//! # Invariants
//!
//! 1. After [`Binding::new`] and after every attached [`Binding::update`],
//!    `root.get() == guest.get()` provided both setters take effect.
//! 2. When both sides moved in one cycle, the dominant side's new value
//!    wins whole; values are never merged.
//! 3. Construction seeds the shadows from the synchronized values, so the
//!    first update after construction pushes nothing.
//! 4. A binding whose root or guest was dropped is detached and its update
//!    does nothing.
//!
//! # Failure Modes
//!
//! - Setter rejection (`Unsupported`): returned from `update()` before the
//!   shadows are captured; the next update retries.
//! - Absent setter: the write is ignored, so the two sides can stay unequal.

use std::cell::RefCell;
use std::fmt;
use std::ptr;
use std::rc::{Rc, Weak};

use crate::equality::equals;
use crate::error::Result;
use crate::property::Property;

/// Precedence policy of a [`Binding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BindingOrder {
    /// Root overwrites guest on every update.
    Dominant,
    /// Guest overwrites root on every update.
    #[default]
    Recessive,
    /// Edits on either side propagate; root wins simultaneous edits.
    BidirectionalDominant,
    /// Edits on either side propagate; guest wins simultaneous edits.
    BidirectionalRecessive,
}

impl BindingOrder {
    #[must_use]
    pub fn is_bidirectional(self) -> bool {
        matches!(
            self,
            BindingOrder::BidirectionalDominant | BindingOrder::BidirectionalRecessive
        )
    }

    /// Whether the root's value prevails when the two sides disagree.
    #[must_use]
    pub fn root_wins(self) -> bool {
        matches!(
            self,
            BindingOrder::Dominant | BindingOrder::BidirectionalDominant
        )
    }
}

/// Propagation chosen by [`reconcile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Push {
    None,
    RootToGuest,
    GuestToRoot,
}

/// Decide which edit to propagate before sync.
///
/// Pure function of the order, the current values, and the shadow values
/// from the previous cycle.
pub fn reconcile<T: PartialEq + ?Sized>(
    order: BindingOrder,
    root_new: &T,
    guest_new: &T,
    root_old: &T,
    guest_old: &T,
) -> Push {
    if !order.is_bidirectional() || equals(root_new, guest_new) {
        return Push::None;
    }
    let root_moved = !equals(root_new, root_old);
    let guest_moved = !equals(guest_new, guest_old);
    let root_first = order.root_wins();

    match (root_first, root_moved, guest_moved) {
        (true, true, _) => Push::RootToGuest,
        (true, false, true) => Push::GuestToRoot,
        (false, _, true) => Push::GuestToRoot,
        (false, true, false) => Push::RootToGuest,
        _ => Push::None,
    }
}

/// Force `root` and `guest` to agree according to `order`.
pub fn sync<T>(root: &dyn Property<T>, guest: &dyn Property<T>, order: BindingOrder) -> Result<()>
where
    T: Clone + PartialEq + 'static,
{
    let root_value = root.get();
    let guest_value = guest.get();
    if equals(&root_value, &guest_value) {
        return Ok(());
    }
    if order.root_wins() {
        guest.set(root_value)
    } else {
        root.set(guest_value)
    }
}

struct Shadow<T> {
    root: T,
    guest: T,
}

/// A durable root/guest relationship with a precedence order.
pub struct Binding<T: 'static> {
    root: Weak<dyn Property<T>>,
    guest: Weak<dyn Property<T>>,
    order: BindingOrder,
    shadow: RefCell<Shadow<T>>,
}

impl<T: Clone + PartialEq + 'static> Binding<T> {
    /// Bind `guest` to `root`, synchronizing them immediately.
    ///
    /// # Errors
    ///
    /// Returns the error of whichever setter sync had to call.
    pub fn new(
        root: &Rc<dyn Property<T>>,
        guest: &Rc<dyn Property<T>>,
        order: BindingOrder,
    ) -> Result<Self> {
        sync(root.as_ref(), guest.as_ref(), order)?;
        let shadow = Shadow {
            root: root.get(),
            guest: guest.get(),
        };
        Ok(Self {
            root: Rc::downgrade(root),
            guest: Rc::downgrade(guest),
            order,
            shadow: RefCell::new(shadow),
        })
    }

    /// Run one reconciliation cycle.
    ///
    /// # Errors
    ///
    /// Propagates setter errors; the shadows are left untouched in that case.
    pub fn update(&self) -> Result<()> {
        let (Some(root), Some(guest)) = (self.root.upgrade(), self.guest.upgrade()) else {
            return Ok(());
        };

        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("binding_update", order = ?self.order).entered();

        let root_new = root.get();
        let guest_new = guest.get();
        let push = {
            let shadow = self.shadow.borrow();
            reconcile(self.order, &root_new, &guest_new, &shadow.root, &shadow.guest)
        };

        match push {
            Push::RootToGuest => {
                tracing::trace!(order = ?self.order, "binding pushed root to guest");
                guest.set(root_new)?;
            }
            Push::GuestToRoot => {
                tracing::trace!(order = ?self.order, "binding pushed guest to root");
                root.set(guest_new)?;
            }
            Push::None => {}
        }

        sync(root.as_ref(), guest.as_ref(), self.order)?;

        let captured = Shadow {
            root: root.get(),
            guest: guest.get(),
        };
        *self.shadow.borrow_mut() = captured;
        Ok(())
    }

    /// The `(root, guest)` values captured at the end of the last cycle.
    #[must_use]
    pub fn last_reconciled(&self) -> (T, T) {
        let shadow = self.shadow.borrow();
        (shadow.root.clone(), shadow.guest.clone())
    }
}

impl<T: 'static> Binding<T> {
    #[must_use]
    pub fn root(&self) -> Option<Rc<dyn Property<T>>> {
        self.root.upgrade()
    }

    #[must_use]
    pub fn guest(&self) -> Option<Rc<dyn Property<T>>> {
        self.guest.upgrade()
    }

    #[must_use]
    pub fn order(&self) -> BindingOrder {
        self.order
    }

    /// Whether both sides are still alive.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.root.strong_count() > 0 && self.guest.strong_count() > 0
    }

    /// Whether `candidate` is this binding's guest, by identity.
    #[must_use]
    pub fn is_guest(&self, candidate: &dyn Property<T>) -> bool {
        ptr::addr_eq(self.guest.as_ptr(), ptr::from_ref(candidate))
    }
}

impl<T: 'static> PartialEq for Binding<T> {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.root, &other.root)
            && Weak::ptr_eq(&self.guest, &other.guest)
            && self.order == other.order
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shadow = self.shadow.borrow();
        f.debug_struct("Binding")
            .field("order", &self.order)
            .field("attached", &self.is_attached())
            .field("root_old", &shadow.root)
            .field("guest_old", &shadow.guest)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
