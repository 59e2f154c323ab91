//! # Data Model
//!
//! The types that cross every boundary: host graphs, pattern graphs, and
//! the vertex mappings the subisomorphism enumerator produces.
//!
//! Design rule: this module is pure data — no I/O, no randomness, no
//! oracle calls beyond the one cached automorphism count on `Pattern`.

pub mod graph;
pub mod mapping;
pub mod pattern;

pub use graph::Graph;
pub use mapping::{Mapping, INVALID_SLOT};
pub use pattern::Pattern;
