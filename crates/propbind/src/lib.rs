#![forbid(unsafe_code)]

//! Observable properties with precedence-ordered bindings.
//!
//! `propbind` re-exports the engine from [`propbind_core`] and adds the
//! convenience surface:
//!
//! - [`properties`]: typed constructors (`integer(0)`, `string("x")`, ...)
//!   and the boolean [`Inverse`] view
//! - [`conditions`]: read-only derived [`Condition`] and [`Conditional`]
//!   values
//! - [`events`]: [`EventListener`] shortcuts (`on_change`, `always`, ...)
//!
//! # Example
//!
//! ```
//! use propbind::prelude::*;
//!
//! let volume = properties::integer(3);
//! let slider = properties::integer(0);
//! volume.bind(slider.clone(), BindingOrder::BidirectionalDominant).unwrap();
//! assert_eq!(slider.get(), 3);
//!
//! slider.set(7).unwrap();
//! volume.update().unwrap();
//! assert_eq!(volume.get(), 7);
//! ```

pub mod conditions;
pub mod events;
mod inverse;
pub mod properties;

pub use conditions::{Condition, Conditional};
pub use inverse::Inverse;
pub use propbind_core::*;

/// Common imports for driving properties from an update loop.
pub mod prelude {
    pub use crate::conditions::{self, Condition, Conditional};
    pub use crate::events;
    pub use crate::properties;
    pub use crate::Inverse;
    pub use propbind_core::{
        BindingOrder, ChangeListener, Continuity, EventListener, ExternalProperty,
        InternalProperty, Observable, ObservableList, ObservableMap, Property, PropertyError,
        event,
    };
}
