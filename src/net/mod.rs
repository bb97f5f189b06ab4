//! URI helpers

pub mod uri;
