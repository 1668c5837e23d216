//! Profiles, friendships, and presence-aware friend lists.

pub mod service;

pub use service::{FriendView, UserProfile, UserService};
