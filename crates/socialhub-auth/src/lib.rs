//! # socialhub-auth
//!
//! Authentication for SocialHub.
//!
//! ## Modules
//!
//! - `jwt` — JWT token creation, validation, and blocklist management
//! - `interceptor` — bearer-token authentication that refreshes presence
//! - `password` — Argon2id password hashing and policy enforcement
//! - `pin` — sign-up confirmation PINs
//! - `directory` — in-process user directory

pub mod directory;
pub mod interceptor;
pub mod jwt;
pub mod password;
pub mod pin;

pub use directory::InMemoryUserDirectory;
pub use interceptor::{Authenticated, Authenticator};
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair, TokenType};
pub use password::{PasswordHasher, PasswordValidator};
pub use pin::ConfirmationPins;
