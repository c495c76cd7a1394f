//! Boolean negation view over another property.

use std::fmt;
use std::rc::Rc;

use propbind_core::{
    Binding, BindingOrder, ChangeListener, EventListener, ListenerId, Observable, Property, Result,
    TypeTag,
};

/// Reads and writes the negation of a wrapped boolean property.
///
/// Only `get` and `set` are negated. Listener registries, bindings, and
/// `update` act on the wrapped property directly, so listeners see the
/// wrapped property's values.
pub struct Inverse {
    property: Rc<dyn Property<bool>>,
}

impl Inverse {
    #[must_use]
    pub fn new(property: Rc<dyn Property<bool>>) -> Self {
        Self { property }
    }

    /// The wrapped property.
    #[must_use]
    pub fn inner(&self) -> &Rc<dyn Property<bool>> {
        &self.property
    }
}

impl Observable<bool> for Inverse {
    fn add_listener(&self, listener: Rc<dyn ChangeListener<bool>>) -> ListenerId {
        self.property.add_listener(listener)
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        self.property.remove_listener(id)
    }

    fn listeners(&self) -> Vec<Rc<dyn ChangeListener<bool>>> {
        self.property.listeners()
    }

    fn add_event_listener(&self, listener: Rc<EventListener>) -> ListenerId {
        self.property.add_event_listener(listener)
    }

    fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.property.remove_event_listener(id)
    }

    fn event_listeners(&self) -> Vec<Rc<EventListener>> {
        self.property.event_listeners()
    }

    fn update(&self) -> Result<()> {
        self.property.update()
    }
}

impl Property<bool> for Inverse {
    fn get(&self) -> bool {
        !self.property.get()
    }

    fn set(&self, value: bool) -> Result<()> {
        self.property.set(!value)
    }

    fn bind(&self, guest: Rc<dyn Property<bool>>, order: BindingOrder) -> Result<()> {
        self.property.bind(guest, order)
    }

    fn unbind(&self, guest: &dyn Property<bool>) -> Result<bool> {
        self.property.unbind(guest)
    }

    fn bindings(&self) -> Vec<Rc<Binding<bool>>> {
        self.property.bindings()
    }

    fn value_type(&self) -> TypeTag {
        self.property.value_type()
    }
}

impl fmt::Debug for Inverse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inverse").field("value", &self.get()).finish()
    }
}
