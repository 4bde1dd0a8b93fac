//! Persisted edit model of the alarm filter
//!
//! The edit model stores which filters are checked and the values of the
//! event time and severity ranges. It consists of a schema (which properties
//! exist and their declared type) and an instance (the stored values), both
//! kept in line with the filters configuration by [`reconcile`].

pub mod error;
pub mod instance;
pub mod reconcile;
pub mod store;
pub mod tree;

pub use error::EditModelError;
pub use instance::InstanceTree;
pub use reconcile::{Changes, ReconcileReport, reconcile, reconcile_in_place};
pub use store::{EditModelNames, EditModelStore};
pub use tree::{PropertyNode, PropertyType, PropertyValue};
