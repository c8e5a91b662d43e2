//! Sign In Use Case
//!
//! Authenticates a user and issues a stateless session token.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::SessionConfig;
use crate::application::token::{self, SessionClaims};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// Signed session token for the cookie
    pub session_token: String,
    /// Anti-forgery nonce, echoed once in a response header
    pub csrf_token: String,
    /// Authenticated user (the handler projects the public profile)
    pub user: User,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
    config: Arc<SessionConfig>,
}

impl<R> SignInUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>, config: Arc<SessionConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        // Exact match against the stored (creation-normalized) email.
        // Unknown email and wrong password take the same exit.
        let user = self
            .user_repo
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password = ClearTextPassword::new(input.password)
            .map_err(|_| AuthError::InvalidCredentials)?;

        let password_valid = user
            .password_hash
            .verify(&password)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        if !password_valid {
            return Err(AuthError::InvalidCredentials);
        }

        // Fresh anti-forgery nonce per login, embedded in the signed token
        let csrf_token = platform::crypto::random_token(32);

        let claims = SessionClaims::new(
            user.user_id.into_uuid(),
            user.email.as_str().to_string(),
            csrf_token.clone(),
            self.config.ttl,
        );
        let session_token = token::sign(&claims, &self.config.secret);

        tracing::info!(user_id = %user.user_id, "user signed in");

        Ok(SignInOutput {
            session_token,
            csrf_token,
            user,
        })
    }
}
