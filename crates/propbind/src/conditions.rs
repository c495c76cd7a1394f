//! Derived, read-only properties driven by a boolean condition.
//!
//! A [`Condition`] mirrors a boolean property; a [`Conditional<T>`] picks
//! one of two fixed values depending on a condition. Both are full
//! observables (their `update()` runs change detection over the derived
//! value) but reject `set`, `bind`, and `unbind` with
//! [`PropertyError::Unsupported`].

use std::fmt;
use std::rc::Rc;

use propbind_core::{
    Binding, BindingOrder, ChangeListener, EventListener, ListenerId, Observable, ObservableCore,
    Property, PropertyError, Result, TypeTag,
};

use crate::inverse::Inverse;
use crate::properties::boolean;

/// Forward the registry half of [`Observable`] to a `core` field and run
/// change detection over `Property::get` in `update`.
macro_rules! derived_observable {
    ($ty:ty, $value:ty $(, $gen:ident)?) => {
        impl$(<$gen: Clone + PartialEq + 'static>)? Observable<$value> for $ty {
            fn add_listener(&self, listener: Rc<dyn ChangeListener<$value>>) -> ListenerId {
                self.core.add_listener(listener)
            }

            fn remove_listener(&self, id: ListenerId) -> bool {
                self.core.remove_listener(id)
            }

            fn listeners(&self) -> Vec<Rc<dyn ChangeListener<$value>>> {
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
                self.core.observe(self, self.get());
                Ok(())
            }
        }
    };
}

/// Read-only boolean view of another boolean property.
pub struct Condition {
    source: Rc<dyn Property<bool>>,
    core: ObservableCore<bool>,
}

impl Condition {
    #[must_use]
    pub fn new(source: Rc<dyn Property<bool>>) -> Rc<Self> {
        let initial = source.get();
        Rc::new(Self {
            source,
            core: ObservableCore::new(initial),
        })
    }

    /// The property this condition reads.
    #[must_use]
    pub fn source(&self) -> &Rc<dyn Property<bool>> {
        &self.source
    }

    /// A value that is `when_true` while this condition holds and
    /// `when_false` otherwise.
    #[must_use]
    pub fn choose<T: Clone + PartialEq + 'static>(
        self: &Rc<Self>,
        when_true: T,
        when_false: T,
    ) -> Rc<Conditional<T>> {
        Conditional::new(Some(Rc::clone(self)), when_true, when_false)
    }
}

impl Property<bool> for Condition {
    fn get(&self) -> bool {
        self.source.get()
    }

    fn set(&self, _value: bool) -> Result<()> {
        Err(PropertyError::unsupported("set"))
    }

    fn bind(&self, _guest: Rc<dyn Property<bool>>, _order: BindingOrder) -> Result<()> {
        Err(PropertyError::unsupported("bind"))
    }

    fn unbind(&self, _guest: &dyn Property<bool>) -> Result<bool> {
        Err(PropertyError::unsupported("unbind"))
    }

    fn bindings(&self) -> Vec<Rc<Binding<bool>>> {
        Vec::new()
    }

    fn value_type(&self) -> TypeTag {
        TypeTag::of::<bool>()
    }
}

derived_observable!(Condition, bool);

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition").field("value", &self.get()).finish()
    }
}

/// Read-only value selected by a [`Condition`].
///
/// Without a condition the true-branch value is used.
pub struct Conditional<T: 'static> {
    condition: Option<Rc<Condition>>,
    when_true: T,
    when_false: T,
    core: ObservableCore<T>,
}

impl<T: Clone + PartialEq + 'static> Conditional<T> {
    #[must_use]
    pub fn new(condition: Option<Rc<Condition>>, when_true: T, when_false: T) -> Rc<Self> {
        let holds = condition.as_ref().is_none_or(|c| c.get());
        let initial = if holds { when_true.clone() } else { when_false.clone() };
        Rc::new(Self {
            condition,
            when_true,
            when_false,
            core: ObservableCore::new(initial),
        })
    }

    #[must_use]
    pub fn condition(&self) -> Option<&Rc<Condition>> {
        self.condition.as_ref()
    }

    #[must_use]
    pub fn when_true(&self) -> &T {
        &self.when_true
    }

    #[must_use]
    pub fn when_false(&self) -> &T {
        &self.when_false
    }
}

impl<T: Clone + PartialEq + 'static> Property<T> for Conditional<T> {
    fn get(&self) -> T {
        match &self.condition {
            Some(condition) if !condition.get() => self.when_false.clone(),
            _ => self.when_true.clone(),
        }
    }

    fn set(&self, _value: T) -> Result<()> {
        Err(PropertyError::unsupported("set"))
    }

    fn bind(&self, _guest: Rc<dyn Property<T>>, _order: BindingOrder) -> Result<()> {
        Err(PropertyError::unsupported("bind"))
    }

    fn unbind(&self, _guest: &dyn Property<T>) -> Result<bool> {
        Err(PropertyError::unsupported("unbind"))
    }

    fn bindings(&self) -> Vec<Rc<Binding<T>>> {
        Vec::new()
    }

    fn value_type(&self) -> TypeTag {
        TypeTag::of::<T>()
    }
}

derived_observable!(Conditional<T>, T, T);

impl<T: Clone + PartialEq + fmt::Debug + 'static> fmt::Debug for Conditional<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conditional")
            .field("value", &self.get())
            .field("has_condition", &self.condition.is_some())
            .finish()
    }
}

/// Condition that holds while `condition` is true.
pub fn when(condition: Rc<dyn Property<bool>>) -> Rc<Condition> {
    Condition::new(condition)
}

/// Condition that holds while `condition` is false.
pub fn when_not(condition: Rc<dyn Property<bool>>) -> Rc<Condition> {
    Condition::new(Rc::new(Inverse::new(condition)))
}

/// Condition over a fresh property initialized to `true`.
pub fn if_true() -> Rc<Condition> {
    when(boolean(true))
}

/// Condition over a fresh property initialized to `false`.
pub fn if_false() -> Rc<Condition> {
    when(boolean(false))
}
