//! Account lifecycle: sign-up, PIN confirmation, login, token refresh, logout.

pub mod service;

pub use service::{AccountService, SignUp, SignUpOutcome};
