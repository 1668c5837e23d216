//! Account service: sign-up with PIN confirmation, login, refresh, logout.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use socialhub_auth::{
    Claims, ConfirmationPins, JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator,
    TokenPair,
};
use socialhub_core::error::{AppError, CODE_UNCONFIRMED_USER};
use socialhub_core::result::AppResult;
use socialhub_core::traits::UserDirectory;
use socialhub_core::types::{NewUser, UserRecord};

/// Sign-up input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUp {
    /// Login email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Plaintext password.
    pub password: String,
}

/// Result of a sign-up.
#[derive(Debug, Clone)]
pub struct SignUpOutcome {
    /// The created, not yet confirmed user.
    pub user: UserRecord,
    /// PIN the user must present to confirm the account.
    pub confirmation_pin: String,
}

/// Handles account registration and credential exchange.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// User storage.
    directory: Arc<dyn UserDirectory>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Password policy.
    validator: PasswordValidator,
    /// Confirmation PIN issuer.
    pins: ConfirmationPins,
    /// Token signer.
    encoder: JwtEncoder,
    /// Token verifier and revoker.
    decoder: JwtDecoder,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        hasher: PasswordHasher,
        validator: PasswordValidator,
        pins: ConfirmationPins,
        encoder: JwtEncoder,
        decoder: JwtDecoder,
    ) -> Self {
        Self {
            directory,
            hasher,
            validator,
            pins,
            encoder,
            decoder,
        }
    }

    /// Registers an inactive user and issues its confirmation PIN.
    pub async fn sign_up(&self, input: SignUp) -> AppResult<SignUpOutcome> {
        let email = input.email.trim().to_lowercase();
        validate_email(&email)?;
        let first_name = required("first_name", &input.first_name)?;
        let last_name = required("last_name", &input.last_name)?;
        self.validator
            .validate(
                &input.password,
                &[email.as_str(), first_name.as_str(), last_name.as_str()],
            )?;

        if self.directory.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("A user with this email already exists"));
        }

        let user = self
            .directory
            .create(NewUser {
                email,
                first_name,
                last_name,
                password_hash: self.hasher.hash(&input.password)?,
            })
            .await?;
        let confirmation_pin = match self.pins.issue(user.id).await {
            Ok(pin) => pin,
            Err(e) => {
                if let Err(cleanup) = self.directory.delete(user.id).await {
                    warn!(user_id = %user.id, error = %cleanup, "Could not roll back sign-up");
                }
                warn!(user_id = %user.id, error = %e, "Sign-up rolled back, PIN not issued");
                return Err(e);
            }
        };

        info!(user_id = %user.id, "User signed up, awaiting confirmation");

        Ok(SignUpOutcome {
            user,
            confirmation_pin,
        })
    }

    /// Issues a fresh confirmation PIN for an account that is not yet
    /// confirmed. The previous PIN stops working.
    pub async fn resend_pin(&self, email: &str, password: &str) -> AppResult<SignUpOutcome> {
        let user = self.check_password(email, password).await?;
        if user.is_active {
            return Err(AppError::conflict("User is already confirmed"));
        }

        let confirmation_pin = self.pins.issue(user.id).await?;
        info!(user_id = %user.id, "Confirmation PIN reissued");
        Ok(SignUpOutcome {
            user,
            confirmation_pin,
        })
    }

    /// Confirms an account with its PIN and returns the first token pair.
    pub async fn confirm(&self, user_id: Uuid, pin: &str) -> AppResult<(UserRecord, TokenPair)> {
        let user = self
            .directory
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;
        if user.is_active {
            return Err(AppError::conflict("User is already confirmed"));
        }

        self.pins.redeem(user_id, pin).await?;
        let user = self.directory.activate(user_id).await?;
        let tokens = self.encoder.generate_token_pair(user.id)?;

        info!(user_id = %user.id, "User confirmed");

        Ok((user, tokens))
    }

    /// Exchanges email and password for a token pair.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(UserRecord, TokenPair)> {
        let user = self.check_password(email, password).await?;
        if !user.is_active {
            return Err(AppError::authentication("User unconfirmed").with_code(CODE_UNCONFIRMED_USER));
        }

        let tokens = self.encoder.generate_token_pair(user.id)?;
        info!(user_id = %user.id, "User logged in");
        Ok((user, tokens))
    }

    /// Issues a new access token for a valid refresh token.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<String> {
        let claims = self.decoder.decode_refresh_token(refresh_token).await?;
        let user = self
            .directory
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("User no longer exists"))?;
        if !user.is_active {
            return Err(AppError::authentication("User unconfirmed").with_code(CODE_UNCONFIRMED_USER));
        }

        let (access, _) = self.encoder.generate_access_token(user.id)?;
        Ok(access)
    }

    /// Revokes the presented access token.
    ///
    /// The presence record is left to expire on its own.
    pub async fn logout(&self, claims: &Claims) -> AppResult<()> {
        self.decoder.blocklist_token(claims).await?;
        info!(user_id = %claims.user_id(), jti = %claims.jti, "Access token revoked");
        Ok(())
    }
}

impl AccountService {
    async fn check_password(&self, email: &str, password: &str) -> AppResult<UserRecord> {
        let invalid = || AppError::authentication("Invalid email or password");

        let user = self
            .directory
            .find_by_email(email)
            .await?
            .ok_or_else(invalid)?;
        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(invalid());
        }
        Ok(user)
    }
}

fn validate_email(email: &str) -> AppResult<()> {
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !domain.contains('@')
    });
    if valid {
        Ok(())
    } else {
        Err(AppError::validation("Invalid email format"))
    }
}

fn required(field: &str, value: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{field} cannot be empty")));
    }
    Ok(value.to_string())
}
