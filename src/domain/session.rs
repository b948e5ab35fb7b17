// src/domain/session.rs
use std::fmt;

/// Bearer token proving a logged-in session.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Keep tokens out of logs
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_token_when_formatting_bearer_then_prefixes_scheme() {
        assert_eq!(Token::new("abc").bearer(), "Bearer abc");
    }

    #[test]
    fn given_token_when_debug_printing_then_value_is_hidden() {
        assert_eq!(format!("{:?}", Token::new("abc")), "Token(***)");
    }
}
