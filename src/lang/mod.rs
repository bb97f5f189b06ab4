//! Language level helpers

pub mod validate;
