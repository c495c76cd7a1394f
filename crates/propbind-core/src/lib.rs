#![forbid(unsafe_code)]

//! Pull-driven change detection and property bindings.
//!
//! This crate provides:
//! - [`Observable`] and [`ObservableCore`] for change detection on explicit
//!   `update()` calls
//! - [`Property`] with [`InternalProperty`] and [`ExternalProperty`] storage
//! - [`Binding`] for keeping two properties equal under a [`BindingOrder`]
//! - [`EventListener`] for condition-gated callbacks with [`Continuity`]
//! - [`ObservableList`] and [`ObservableMap`] collection adapters
//!
//! Nothing runs on its own. A caller-owned loop calls `update()` on each
//! property (and `execute()` on each event listener) once per tick.
//! Everything is single-threaded.

pub mod capability;
pub mod collections;
pub mod equality;
pub mod error;
pub mod event;
pub mod observable;
pub mod property;
pub mod type_tag;

pub use capability::{Event, Getter, Setter};
pub use collections::{MapBacking, ObservableList, ObservableMap, Sequence};
pub use equality::{equals, nullable_eq};
pub use error::{PropertyError, Result};
pub use event::{Continuity, EventListener, EventRef, event};
pub use observable::{ChangeListener, ListenerId, Observable, ObservableCore, change_listener};
pub use property::{
    Binding, BindingOrder, ExternalProperty, InternalProperty, Property, WriteAccess,
};
pub use type_tag::{TypeTag, ValueKind};
