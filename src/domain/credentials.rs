// src/domain/credentials.rs
use crate::constants::MIN_SECRET_LEN;
use crate::domain::DomainError;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Login/registration credentials that passed client-side validation.
///
/// Serializes to the `{username, password}` body both auth endpoints expect.
#[derive(Clone, Serialize)]
pub struct Credentials {
    #[serde(rename = "username")]
    identifier: String,
    #[serde(rename = "password")]
    secret: String,
}

impl Credentials {
    /// Validate the form fields without touching the network.
    ///
    /// The identifier is trimmed; the secret is taken as typed.
    pub fn parse(identifier: &str, secret: &str) -> Result<Self, DomainError> {
        let identifier = identifier.trim();

        if identifier.is_empty() || secret.is_empty() {
            return Err(DomainError::Form("Please fill in all fields".to_string()));
        }
        if !EMAIL_RE.is_match(identifier) {
            return Err(DomainError::Form(format!(
                "'{}' is not a valid email address",
                identifier
            )));
        }
        if secret.chars().count() < MIN_SECRET_LEN {
            return Err(DomainError::Form(format!(
                "Password must be at least {} characters",
                MIN_SECRET_LEN
            )));
        }

        Ok(Self {
            identifier: identifier.to_string(),
            secret: secret.to_string(),
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"***")
            .finish()
    }
}
