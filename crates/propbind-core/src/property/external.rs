//! Property whose value lives outside it, reached through a getter and
//! an optional setter.

use std::fmt;
use std::rc::{Rc, Weak};

use crate::capability::{Getter, Setter};
use crate::collections::ObservableList;
use crate::error::{PropertyError, Result};
use crate::property::base::{PropertyBase, delegate_observable};
use crate::property::binding::{Binding, BindingOrder};
use crate::property::Property;
use crate::type_tag::TypeTag;

/// How an [`ExternalProperty`] handles `set`.
pub enum WriteAccess<T: 'static> {
    /// Forward writes to the setter.
    Setter(Rc<dyn Setter<T>>),
    /// No setter: writes are silently dropped.
    Ignore,
    /// Read-only: writes fail with [`PropertyError::Unsupported`].
    Reject,
}

impl<T: 'static> Clone for WriteAccess<T> {
    fn clone(&self) -> Self {
        match self {
            WriteAccess::Setter(setter) => WriteAccess::Setter(Rc::clone(setter)),
            WriteAccess::Ignore => WriteAccess::Ignore,
            WriteAccess::Reject => WriteAccess::Reject,
        }
    }
}

impl<T: 'static> fmt::Debug for WriteAccess<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WriteAccess::Setter(_) => "Setter",
            WriteAccess::Ignore => "Ignore",
            WriteAccess::Reject => "Reject",
        })
    }
}

/// A property delegating storage to external accessors.
pub struct ExternalProperty<T: 'static> {
    getter: Rc<dyn Getter<T>>,
    write: WriteAccess<T>,
    base: PropertyBase<T>,
    self_ref: Weak<Self>,
}

impl<T: Clone + PartialEq + 'static> ExternalProperty<T> {
    /// Wrap a getter/setter pair.
    #[must_use]
    pub fn new(getter: impl Fn() -> T + 'static, setter: impl Fn(T) + 'static) -> Rc<Self> {
        Self::with_access(Rc::new(getter), WriteAccess::Setter(Rc::new(setter)))
    }

    /// Wrap a getter alone; `set` becomes a silent no-op.
    #[must_use]
    pub fn without_setter(getter: impl Fn() -> T + 'static) -> Rc<Self> {
        Self::with_access(Rc::new(getter), WriteAccess::Ignore)
    }

    /// Wrap a getter alone; `set` fails with `Unsupported`.
    #[must_use]
    pub fn read_only(getter: impl Fn() -> T + 'static) -> Rc<Self> {
        Self::with_access(Rc::new(getter), WriteAccess::Reject)
    }

    /// Wrap capability objects. A missing setter makes writes no-ops.
    #[must_use]
    pub fn from_capabilities(
        getter: Rc<dyn Getter<T>>,
        setter: Option<Rc<dyn Setter<T>>>,
    ) -> Rc<Self> {
        let write = setter.map_or(WriteAccess::Ignore, WriteAccess::Setter);
        Self::with_access(getter, write)
    }

    /// The initial remembered value is read from `getter` once.
    #[must_use]
    pub fn with_access(getter: Rc<dyn Getter<T>>, write: WriteAccess<T>) -> Rc<Self> {
        let initial = getter.get();
        Rc::new_cyclic(|self_ref| Self {
            getter,
            write,
            base: PropertyBase::new(initial),
            self_ref: self_ref.clone(),
        })
    }

    #[must_use]
    pub fn getter(&self) -> &Rc<dyn Getter<T>> {
        &self.getter
    }

    #[must_use]
    pub fn setter(&self) -> Option<&Rc<dyn Setter<T>>> {
        match &self.write {
            WriteAccess::Setter(setter) => Some(setter),
            WriteAccess::Ignore | WriteAccess::Reject => None,
        }
    }

    #[must_use]
    pub fn write_access(&self) -> &WriteAccess<T> {
        &self.write
    }

    #[must_use]
    pub fn is_writable(&self) -> bool {
        matches!(self.write, WriteAccess::Setter(_))
    }

    #[must_use]
    pub fn binding_list(&self) -> &ObservableList<Rc<Binding<T>>> {
        self.base.binding_list()
    }
}

impl<T: Clone + PartialEq + 'static> Property<T> for ExternalProperty<T> {
    fn get(&self) -> T {
        self.getter.get()
    }

    fn set(&self, value: T) -> Result<()> {
        match &self.write {
            WriteAccess::Setter(setter) => {
                setter.set(value);
                Ok(())
            }
            WriteAccess::Ignore => {
                tracing::debug!(ty = self.base.type_tag().name(), "write ignored: no setter");
                Ok(())
            }
            WriteAccess::Reject => Err(PropertyError::unsupported("set")),
        }
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

delegate_observable!(ExternalProperty);

impl<T: Clone + PartialEq + 'static> fmt::Debug for ExternalProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalProperty")
            .field("type", &self.base.type_tag())
            .field("write", &self.write)
            .field("bindings", &self.base.binding_list().len())
            .finish()
    }
}
