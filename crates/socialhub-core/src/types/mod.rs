//! Shared domain types.

pub mod chat;
pub mod pagination;
pub mod policy;
pub mod user;

pub use chat::{ChatRecord, NewChat};
pub use pagination::{Page, PageRequest};
pub use policy::PolicyKind;
pub use user::{NewUser, UserRecord};
