// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid form: {0}")]
    Form(String),
    #[error("Authentication failed: {0}")]
    Auth(String),
    /// Login endpoint refused the credentials (401/403); reported to the user as `Auth`
    #[error("Authentication failed: {0}")]
    CredentialsRejected(String),
    #[error("Rejected by server: {0}")]
    Validation(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Note not found: {0}")]
    NoteNotFound(i64),
    #[error("Session store error: {0}")]
    Storage(String),
    #[error("Too many failed logins. Pass the trainer quiz before trying again")]
    QuizRequired,
}

impl DomainError {
    /// Title shown above the message when the error is presented to the user
    pub fn title(&self) -> &'static str {
        match self {
            DomainError::Form(_) => "Error",
            DomainError::Auth(_) | DomainError::CredentialsRejected(_) => "Login failed",
            DomainError::Validation(_) => "Error",
            DomainError::Network(_) => "Connection problem",
            DomainError::NoteNotFound(_) => "Note not found",
            DomainError::Storage(_) => "Error",
            DomainError::QuizRequired => "Who's that Pokémon?",
        }
    }
}
