//! Graph containers.
//!
//! ## Submodules
//!
//! - [`directed`]: [`DirectedGraph`], a labeled directed graph with
//!   weighted edges. The social network stores friendships in it as one edge
//!   per direction.

pub mod directed;

pub use directed::{DEFAULT_WEIGHT, DirectedGraph, EdgeView};
