//! Instagram private API integration surface.
//!
//! Submodules provide the session client (device generation, pre-login
//! handshake, login, feed factories) and strongly typed response models.
pub mod client;
pub mod types;

pub use client::{FriendshipsFeed, InstagramSession};
