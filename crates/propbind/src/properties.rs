//! Typed property constructors.
//!
//! Thin wrappers over [`InternalProperty::new`] and the
//! [`ExternalProperty`] constructors, one per common value type.

use std::rc::Rc;

use propbind_core::{ExternalProperty, InternalProperty, Property};

use crate::inverse::Inverse;

pub fn boolean(value: bool) -> Rc<InternalProperty<bool>> {
    InternalProperty::new(value)
}

pub fn byte(value: i8) -> Rc<InternalProperty<i8>> {
    InternalProperty::new(value)
}

pub fn short(value: i16) -> Rc<InternalProperty<i16>> {
    InternalProperty::new(value)
}

pub fn integer(value: i32) -> Rc<InternalProperty<i32>> {
    InternalProperty::new(value)
}

pub fn long(value: i64) -> Rc<InternalProperty<i64>> {
    InternalProperty::new(value)
}

pub fn float(value: f32) -> Rc<InternalProperty<f32>> {
    InternalProperty::new(value)
}

pub fn double(value: f64) -> Rc<InternalProperty<f64>> {
    InternalProperty::new(value)
}

pub fn string(value: impl Into<String>) -> Rc<InternalProperty<String>> {
    InternalProperty::new(value.into())
}

/// Property of any comparable value type.
pub fn generic<T: Clone + PartialEq + 'static>(value: T) -> Rc<InternalProperty<T>> {
    InternalProperty::new(value)
}

/// Property holding `T::default()` (`false`, `0`, `""`, ...).
pub fn with_default<T: Clone + PartialEq + Default + 'static>() -> Rc<InternalProperty<T>> {
    InternalProperty::with_default()
}

/// Property backed by a getter/setter pair.
pub fn external<T: Clone + PartialEq + 'static>(
    getter: impl Fn() -> T + 'static,
    setter: impl Fn(T) + 'static,
) -> Rc<ExternalProperty<T>> {
    ExternalProperty::new(getter, setter)
}

/// Property backed by a getter alone; writes are silently ignored.
pub fn without_setter<T: Clone + PartialEq + 'static>(
    getter: impl Fn() -> T + 'static,
) -> Rc<ExternalProperty<T>> {
    ExternalProperty::without_setter(getter)
}

/// Property backed by a getter alone; writes fail with `Unsupported`.
pub fn read_only<T: Clone + PartialEq + 'static>(
    getter: impl Fn() -> T + 'static,
) -> Rc<ExternalProperty<T>> {
    ExternalProperty::read_only(getter)
}

/// Boolean view negating `property` in both directions.
pub fn inverse(property: Rc<dyn Property<bool>>) -> Rc<Inverse> {
    Rc::new(Inverse::new(property))
}
