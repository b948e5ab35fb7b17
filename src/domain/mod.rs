// src/domain/mod.rs
pub mod credentials;
pub mod error;
pub mod note;
pub mod question;
pub mod session;

pub use credentials::Credentials;
pub use error::DomainError;
pub use note::{Note, NoteDraft, NotePatch};
pub use question::{question_bank, Question};
pub use session::Token;
