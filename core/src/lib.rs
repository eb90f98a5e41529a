//! Readiness-probing engine: per-target retry loops and the coordinator
//! that races their joint completion against the global deadline.

pub mod coordinator;
pub mod retry;

pub use coordinator::{CoordinatorResult, wait};
