// src/application/authenticator.rs
use crate::application::{KeyValueStore, Route, SessionGate};
use crate::domain::{Credentials, DomainError, Token};
use async_trait::async_trait;
use tracing::{info, warn};

/// Remote authentication endpoints
#[async_trait]
pub trait AuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<Token, DomainError>;

    async fn register(&self, credentials: &Credentials) -> Result<(), DomainError>;
}

/// Login/signup/logout flow on top of the session gate
pub struct Authenticator<A: AuthApi, S: KeyValueStore> {
    api: A,
    session: SessionGate<S>,
}

impl<A: AuthApi, S: KeyValueStore> Authenticator<A, S> {
    pub fn new(api: A, session: SessionGate<S>) -> Self {
        Self { api, session }
    }

    /// Log in and establish the session; navigates to the notes list.
    ///
    /// Rejected credentials arm the retry lock, so the next attempt needs a
    /// passed quiz first. Server failures surface as `Auth` without arming it.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<Route, DomainError> {
        let credentials = Credentials::parse(identifier, secret)?;

        if self.session.retry_locked()? {
            return Err(DomainError::QuizRequired);
        }

        match self.api.login(&credentials).await {
            Ok(token) => {
                self.session.establish(&token)?;
                info!(user = credentials.identifier(), "Welcome back, trainer");
                Ok(Route::Notes)
            }
            Err(DomainError::CredentialsRejected(msg)) => {
                warn!(user = credentials.identifier(), %msg, "Login rejected");
                self.session.arm_retry_lock()?;
                Err(DomainError::Auth(msg))
            }
            Err(e) => {
                warn!(user = credentials.identifier(), error = %e, "Login failed");
                Err(e)
            }
        }
    }

    /// Create an account; navigates back to the index screen
    pub async fn register(&self, identifier: &str, secret: &str) -> Result<Route, DomainError> {
        let credentials = Credentials::parse(identifier, secret)?;

        self.api.register(&credentials).await?;
        info!(user = credentials.identifier(), "Trainer registered");
        Ok(Route::Index)
    }

    pub fn logout(&self) -> Result<Route, DomainError> {
        self.session.clear()?;
        Ok(Route::Login)
    }
}
