//! Profile data types.

pub mod profile;

pub use profile::{ProfileKey, ProfileUpdate, UserId, UserProfile};
