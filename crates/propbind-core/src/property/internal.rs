//! Property storing its value in a field it owns.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::collections::ObservableList;
use crate::error::{PropertyError, Result};
use crate::observable::ListenerEntry;
use crate::property::base::{PropertyBase, delegate_observable};
use crate::property::binding::{Binding, BindingOrder};
use crate::property::Property;
use crate::type_tag::TypeTag;

/// A property that owns its value.
///
/// `set` is visible to `get` immediately; listeners hear about it on the
/// next [`update()`](crate::observable::Observable::update).
pub struct InternalProperty<T: 'static> {
    value: RefCell<T>,
    base: PropertyBase<T>,
    self_ref: Weak<Self>,
}

impl<T: Clone + PartialEq + 'static> InternalProperty<T> {
    /// Create a property holding `value`. Construction is not a change.
    #[must_use]
    pub fn new(value: T) -> Rc<Self> {
        Rc::new_cyclic(|self_ref| Self {
            base: PropertyBase::new(value.clone()),
            value: RefCell::new(value),
            self_ref: self_ref.clone(),
        })
    }

    /// Store `value` and return the previous one.
    pub fn replace(&self, value: T) -> T {
        self.value.replace(value)
    }

    /// The observable list holding this property's bindings.
    #[must_use]
    pub fn binding_list(&self) -> &ObservableList<Rc<Binding<T>>> {
        self.base.binding_list()
    }

    /// The observable list holding this property's change listeners.
    #[must_use]
    pub fn listener_list(&self) -> &ObservableList<ListenerEntry<T>> {
        self.base.core().listener_slots()
    }
}

impl<T: Clone + PartialEq + Default + 'static> InternalProperty<T> {
    /// Create a property holding `T::default()`.
    #[must_use]
    pub fn with_default() -> Rc<Self> {
        Self::new(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> Property<T> for InternalProperty<T> {
    fn get(&self) -> T {
        self.value.borrow().clone()
    }

    fn set(&self, value: T) -> Result<()> {
        *self.value.borrow_mut() = value;
        Ok(())
    }

    fn bind(&self, guest: Rc<dyn Property<T>>, order: BindingOrder) -> Result<()> {
        let root: Rc<dyn Property<T>> = self.self_ref.upgrade().ok_or(PropertyError::Detached)?;
        self.base.bind(&root, &guest, order)
    }

    fn unbind(&self, guest: &dyn Property<T>) -> Result<bool> {
        Ok(self.base.unbind(guest))
    }

    fn bindings(&self) -> Vec<Rc<Binding<T>>> {
        self.base.bindings()
    }

    fn value_type(&self) -> TypeTag {
        self.base.type_tag()
    }
}

delegate_observable!(InternalProperty);

impl<T: Clone + PartialEq + fmt::Debug + 'static> fmt::Debug for InternalProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InternalProperty")
            .field("value", &self.value.borrow())
            .field("type", &self.base.type_tag())
            .field("bindings", &self.base.binding_list().len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observable::Observable;
    use crate::type_tag::ValueKind;
    use std::cell::Cell;

    fn changes(prop: &InternalProperty<i32>) -> Rc<RefCell<Vec<(i32, i32)>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        prop.on_change(move |_, old, new| sink.borrow_mut().push((*old, *new)));
        log
    }

    #[test]
    fn set_is_visible_before_update_but_silent() {
        let prop = InternalProperty::new(0);
        let log = changes(&prop);

        prop.set(5).unwrap();
        assert_eq!(prop.get(), 5);
        assert!(log.borrow().is_empty());

        prop.update().unwrap();
        assert_eq!(*log.borrow(), vec![(0, 5)]);
    }

    #[test]
    fn second_update_is_quiet() {
        let prop = InternalProperty::new(1);
        let log = changes(&prop);
        prop.set(2).unwrap();
        prop.update().unwrap();
        prop.update().unwrap();
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn replace_returns_previous() {
        let prop = InternalProperty::new(String::from("a"));
        assert_eq!(prop.replace(String::from("b")), "a");
        assert_eq!(prop.get(), "b");
    }

    #[test]
    fn with_default_and_type_tag() {
        let prop = InternalProperty::<i64>::with_default();
        assert_eq!(prop.get(), 0);
        assert_eq!(prop.value_type().kind(), ValueKind::Long);
    }

    #[test]
    fn bind_updates_from_root() {
        let root = InternalProperty::new(0);
        let guest = InternalProperty::new(0);
        root.bind(guest.clone(), BindingOrder::BidirectionalDominant).unwrap();
        assert_eq!(root.bindings().len(), 1);

        guest.set(8).unwrap();
        root.update().unwrap();
        assert_eq!(root.get(), 8);
    }

    #[test]
    fn follow_defaults_to_recessive() {
        let root = InternalProperty::new(5);
        let guest = InternalProperty::new(7);
        root.follow(guest.clone()).unwrap();
        assert_eq!(root.bindings()[0].order(), BindingOrder::Recessive);
        assert_eq!((root.get(), guest.get()), (7, 7));
    }

    #[test]
    fn unbind_removes_first_match_only() {
        let root = InternalProperty::new(1);
        let guest = InternalProperty::new(1);
        let other = InternalProperty::new(1);
        root.bind(guest.clone(), BindingOrder::Dominant).unwrap();
        root.bind(other.clone(), BindingOrder::Dominant).unwrap();
        root.bind(guest.clone(), BindingOrder::BidirectionalDominant).unwrap();

        assert!(root.unbind(guest.as_ref()).unwrap());
        let left: Vec<_> = root.bindings().iter().map(|b| b.order()).collect();
        assert_eq!(
            left,
            vec![BindingOrder::Dominant, BindingOrder::BidirectionalDominant]
        );
        assert!(root.bindings()[1].is_guest(guest.as_ref()));
    }

    #[test]
    fn unbind_unknown_guest_is_silent() {
        let root = InternalProperty::new(1);
        let stranger = InternalProperty::new(1);
        assert!(!root.unbind(stranger.as_ref()).unwrap());
    }

    #[test]
    fn dropped_guest_is_pruned_on_update() {
        let root = InternalProperty::new(1);
        let guest = InternalProperty::new(2);
        root.bind(guest.clone(), BindingOrder::Dominant).unwrap();
        drop(guest);
        assert_eq!(root.bindings().len(), 1);
        root.update().unwrap();
        assert!(root.bindings().is_empty());
    }

    #[test]
    fn binding_error_stops_later_bindings() {
        use crate::property::ExternalProperty;

        let root = InternalProperty::new(1);
        let fixed = ExternalProperty::read_only(|| 1);
        let mirror = InternalProperty::new(1);
        root.bind(fixed.clone(), BindingOrder::Dominant).unwrap();
        root.bind(mirror.clone(), BindingOrder::Dominant).unwrap();
        let log = changes(&root);

        root.set(2).unwrap();
        assert_eq!(root.update(), Err(PropertyError::unsupported("set")));
        assert_eq!(*log.borrow(), vec![(1, 2)], "listeners ran before bindings");
        assert_eq!(mirror.get(), 1, "second binding did not run");

        assert!(root.unbind(fixed.as_ref()).unwrap());
        root.update().unwrap();
        assert_eq!(mirror.get(), 2);
    }

    #[test]
    fn guest_does_not_keep_root_alive() {
        let root = InternalProperty::new(1);
        let guest = InternalProperty::new(1);
        root.bind(guest.clone(), BindingOrder::Dominant).unwrap();
        assert_eq!(Rc::strong_count(&guest), 1);
        assert_eq!(Rc::strong_count(&root), 1);
    }

    #[test]
    fn binding_list_is_observable() {
        let root = InternalProperty::new(1);
        let guest = InternalProperty::new(1);
        let seen = Rc::new(Cell::new(0usize));
        let s = Rc::clone(&seen);
        root.binding_list()
            .on_change(move |_, _, new: &Vec<Rc<Binding<i32>>>| s.set(new.len()));

        root.bind(guest.clone(), BindingOrder::Dominant).unwrap();
        assert_eq!(seen.get(), 0);
        root.update().unwrap();
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn listener_list_tracks_registrations() {
        let prop = InternalProperty::new(0);
        let id = prop.on_change(|_, _, _| {});
        assert_eq!(prop.listener_list().len(), 1);
        assert!(prop.remove_listener(id));
        assert!(prop.listener_list().is_empty());
    }

    #[test]
    fn listener_may_write_back_during_update() {
        let prop = InternalProperty::new(0);
        let target = Rc::clone(&prop);
        prop.on_change(move |_, _, new| {
            if *new > 10 {
                target.set(10).unwrap();
            }
        });
        prop.set(50).unwrap();
        prop.update().unwrap();
        assert_eq!(prop.get(), 10);
    }

    #[test]
    fn debug_format() {
        let prop = InternalProperty::new(3);
        let dbg = format!("{prop:?}");
        assert!(dbg.contains("value: 3"));
        assert!(dbg.contains("bindings: 0"));
    }
}
