//! # socialhub-core
//!
//! Core crate for SocialHub. Contains configuration schemas, the unified
//! error system, the storage and identity traits the other crates
//! implement, and shared domain types.
//!
//! This crate has **no** internal dependencies on other SocialHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
