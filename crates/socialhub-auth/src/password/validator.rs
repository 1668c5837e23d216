//! Password policy enforcement for sign-up.

use socialhub_core::config::AuthConfig;
use socialhub_core::error::AppError;
use socialhub_core::result::AppResult;

/// Minimum zxcvbn score accepted for a new password.
const MIN_SCORE: zxcvbn::Score = zxcvbn::Score::Three;

/// Validates new passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length in characters.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates `password` for an account described by `user_inputs`
    /// (email, names).
    ///
    /// Returns the first violation found.
    pub fn validate(&self, password: &str, user_inputs: &[&str]) -> AppResult<()> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if password.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::validation("Password cannot be entirely numeric"));
        }

        let lowered = password.to_lowercase();
        let similar = user_inputs
            .iter()
            .flat_map(|input| input.split(['@', '.', ' ', '-', '_']))
            .filter(|part| part.chars().count() >= 3)
            .any(|part| lowered.contains(&part.to_lowercase()));
        if similar {
            return Err(AppError::validation(
                "Password is too similar to the account's email or name",
            ));
        }

        let estimate = zxcvbn::zxcvbn(password, user_inputs);
        if estimate.score() < MIN_SCORE {
            return Err(AppError::validation(
                "Password is too weak. Please use a stronger password with more entropy.",
            ));
        }

        Ok(())
    }
}
