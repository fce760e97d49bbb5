#![forbid(unsafe_code)]
//! circle-core library: an in-memory social network of user profiles and
//! mutual friendships, with friend-of-friend suggestions.
//!
//! [`SocialNetwork`] is single-threaded. Wrap it in [`SharedNetwork`] to share
//! one network between threads.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums in [`error`], each mapped to a stable
//!   [`error::ErrorCode`]. Config loading uses `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod graph;
pub mod model;
pub mod network;
pub mod verify;

pub use error::{ErrorCode, GraphError, NetworkError};
pub use graph::DirectedGraph;
pub use model::{ProfileKey, ProfileUpdate, UserId, UserProfile};
pub use network::{SharedNetwork, SocialNetwork, Suggestion};
