//! Core types shared by every module

pub mod error;
pub mod job;

pub use error::{FeilongError, Result};
pub use job::{BoxedJob, ClosureJob, Job};
