//! Readable, writable, bindable observables.
//!
//! A [`Property<T>`] adds `get`/`set` and a list of [`Binding`]s on top of
//! [`Observable<T>`]. Two storage strategies are provided:
//!
//! - [`InternalProperty`] owns its value.
//! - [`ExternalProperty`] reads and writes through caller-supplied
//!   accessors; a missing setter makes writes silent no-ops.
//!
//! A property's `update()` runs change detection, then updates every binding
//! it roots in insertion order, then flushes its self-hosted bookkeeping
//! lists. Bindings whose root or guest has been dropped are pruned first.

use std::rc::Rc;

use crate::error::Result;
use crate::observable::Observable;
use crate::type_tag::TypeTag;

mod base;
pub mod binding;
mod external;
mod internal;

pub use binding::{Binding, BindingOrder, Push, reconcile, sync};
pub use external::{ExternalProperty, WriteAccess};
pub use internal::InternalProperty;

/// An [`Observable`] value that can be read, written, and bound.
pub trait Property<T: 'static>: Observable<T> {
    /// Current value. Idempotent between mutations.
    fn get(&self) -> T;

    /// Replace the value. Listeners are told on the next `update()`.
    ///
    /// # Errors
    ///
    /// [`Unsupported`](crate::PropertyError::Unsupported) for read-only and
    /// derived properties. A property with an absent setter returns `Ok`.
    fn set(&self, value: T) -> Result<()>;

    /// Bind `guest` to this property with this property as root.
    ///
    /// The two are synchronized immediately according to `order`.
    fn bind(&self, guest: Rc<dyn Property<T>>, order: BindingOrder) -> Result<()>;

    /// [`bind`](Self::bind) with [`BindingOrder::Recessive`].
    fn follow(&self, guest: Rc<dyn Property<T>>) -> Result<()> {
        self.bind(guest, BindingOrder::Recessive)
    }

    /// Remove the first binding whose guest is `guest` (by identity).
    /// Returns `Ok(false)` when there is none.
    fn unbind(&self, guest: &dyn Property<T>) -> Result<bool>;

    /// Snapshot of the bindings rooted at this property.
    fn bindings(&self) -> Vec<Rc<Binding<T>>>;

    /// Descriptor of `T`.
    fn value_type(&self) -> TypeTag;
}
