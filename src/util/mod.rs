//! Collection utilities

pub mod collection;
