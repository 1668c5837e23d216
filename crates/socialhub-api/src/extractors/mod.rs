//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod pagination;
pub mod path;

pub use auth::{AuthUser, VerifiedUser};
pub use json::ValidatedJson;
pub use pagination::{Paginated, Pagination};
pub use path::UuidPath;
