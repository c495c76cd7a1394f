//! Bookkeeping shared by the concrete property types.

use std::rc::Rc;

use crate::collections::ObservableList;
use crate::error::Result;
use crate::observable::{EventEntry, ListenerEntry, Observable, ObservableCore};
use crate::property::Property;
use crate::property::binding::{Binding, BindingOrder};
use crate::type_tag::TypeTag;

/// Observable core whose registries are themselves observable lists.
pub(crate) type HostedCore<T> =
    ObservableCore<T, ObservableList<ListenerEntry<T>>, ObservableList<EventEntry>>;

pub(crate) struct PropertyBase<T: 'static> {
    core: HostedCore<T>,
    bindings: ObservableList<Rc<Binding<T>>>,
    type_tag: TypeTag,
}

impl<T: Clone + PartialEq + 'static> PropertyBase<T> {
    pub(crate) fn new(initial: T) -> Self {
        Self {
            core: ObservableCore::with_slots(initial, ObservableList::new(), ObservableList::new()),
            bindings: ObservableList::new(),
            type_tag: TypeTag::of::<T>(),
        }
    }

    pub(crate) fn core(&self) -> &HostedCore<T> {
        &self.core
    }

    pub(crate) fn binding_list(&self) -> &ObservableList<Rc<Binding<T>>> {
        &self.bindings
    }

    pub(crate) fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    pub(crate) fn bind(
        &self,
        root: &Rc<dyn Property<T>>,
        guest: &Rc<dyn Property<T>>,
        order: BindingOrder,
    ) -> Result<()> {
        let binding = Binding::new(root, guest, order)?;
        tracing::trace!(?order, ty = self.type_tag.name(), "binding attached");
        self.bindings.push(Rc::new(binding));
        Ok(())
    }

    pub(crate) fn unbind(&self, guest: &dyn Property<T>) -> bool {
        let removed = self.bindings.remove_where(|b| b.is_guest(guest));
        if removed.is_some() {
            tracing::trace!(ty = self.type_tag.name(), "binding detached");
        }
        removed.is_some()
    }

    pub(crate) fn bindings(&self) -> Vec<Rc<Binding<T>>> {
        self.bindings.snapshot()
    }

    /// Change detection, binding reconciliation, then bookkeeping flush.
    pub(crate) fn update(&self, owner: &dyn Observable<T>, current: T) -> Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("property_update", ty = self.type_tag.name()).entered();

        self.core.observe(owner, current);

        let pruned = self.bindings.retain(|b| b.is_attached());
        if pruned > 0 {
            tracing::debug!(pruned, ty = self.type_tag.name(), "pruned detached bindings");
        }

        for binding in self.bindings.snapshot() {
            binding.update()?;
        }

        self.bindings.update()?;
        self.core.settle()
    }
}

/// Implement [`Observable<T>`] for a property type holding a
/// `base: PropertyBase<T>` field and implementing [`Property<T>`].
macro_rules! delegate_observable {
    ($ty:ident) => {
        impl<T: Clone + PartialEq + 'static> $crate::observable::Observable<T> for $ty<T> {
            fn add_listener(
                &self,
                listener: ::std::rc::Rc<dyn $crate::observable::ChangeListener<T>>,
            ) -> $crate::observable::ListenerId {
                self.base.core().add_listener(listener)
            }

            fn remove_listener(&self, id: $crate::observable::ListenerId) -> bool {
                self.base.core().remove_listener(id)
            }

            fn listeners(&self) -> Vec<::std::rc::Rc<dyn $crate::observable::ChangeListener<T>>> {
                self.base.core().listeners()
            }

            fn add_event_listener(
                &self,
                listener: ::std::rc::Rc<$crate::event::EventListener>,
            ) -> $crate::observable::ListenerId {
                self.base.core().add_event_listener(listener)
            }

            fn remove_event_listener(&self, id: $crate::observable::ListenerId) -> bool {
                self.base.core().remove_event_listener(id)
            }

            fn event_listeners(&self) -> Vec<::std::rc::Rc<$crate::event::EventListener>> {
                self.base.core().event_listeners()
            }

            fn update(&self) -> $crate::error::Result<()> {
                let current = $crate::property::Property::get(self);
                self.base.update(self, current)
            }
        }
    };
}

pub(crate) use delegate_observable;
