//! Read-only access to the properties of serializable values

pub mod property;

pub use property::{compare_values, lookup, property_value};
