//! Deterministic topological sorting with Kahn's algorithm.

pub mod error;
pub mod graph;
pub mod models;

pub use error::{Result, SortError};
pub use graph::{is_topological_order, sort_or_empty, topological_sort};
pub use models::*;
