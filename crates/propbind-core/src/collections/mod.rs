//! Observable adapters over ordinary sequence and map containers.
//!
//! An adapter delegates lookups and mutations to its backing container and
//! participates in the [`Observable`](crate::observable::Observable)
//! contract with the *whole container* as the observed value. Changes are
//! detected by comparing a snapshot of the container taken at the previous
//! update with the current contents; there is no per-element diffing, so a
//! bulk [`replace_all`](ObservableList::replace_all) shows up as a single
//! before/after pair.
//!
//! Properties keep their listener and binding registries in
//! [`ObservableList`]s. The adapters' own registries are plain
//! `RefCell<Vec<_>>` storage, which stops the nesting at one level.

pub mod list;
pub mod map;

pub use list::{ObservableList, Sequence};
pub use map::{MapBacking, ObservableMap};
