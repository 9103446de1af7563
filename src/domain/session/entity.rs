//! Session identity

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Regex pattern for valid session IDs
static ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Maximum length for session IDs
pub const MAX_SESSION_ID_LENGTH: usize = 64;

/// Session used when the client does not identify itself
pub const DEFAULT_SESSION_ID: &str = "default";

/// Identity under which a generated schedule is kept for export
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    /// Create a new validated session ID
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        validate_session_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a random session ID
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self(DEFAULT_SESSION_ID.to_string())
    }
}

impl TryFrom<String> for SessionId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validate a session ID string
pub fn validate_session_id(id: &str) -> Result<(), DomainError> {
    if id.is_empty() {
        return Err(DomainError::invalid_id("Session ID cannot be empty"));
    }

    if id.len() > MAX_SESSION_ID_LENGTH {
        return Err(DomainError::invalid_id(format!(
            "Session ID too long: {} characters (max {})",
            id.len(),
            MAX_SESSION_ID_LENGTH
        )));
    }

    if !ID_PATTERN.is_match(id) {
        return Err(DomainError::invalid_id(format!(
            "Invalid session ID '{}': only letters, digits, '-' and '_' are allowed",
            id
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_session_ids() {
        assert!(SessionId::new("default").is_ok());
        assert!(SessionId::new("tab-42_b").is_ok());
        assert!(SessionId::new("a".repeat(MAX_SESSION_ID_LENGTH)).is_ok());
    }

    #[test]
    fn test_invalid_session_ids() {
        assert!(SessionId::new("").is_err());
        assert!(SessionId::new("has space").is_err());
        assert!(SessionId::new("../etc").is_err());
        assert!(SessionId::new("a".repeat(MAX_SESSION_ID_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_generated_id_is_valid() {
        let id = SessionId::generate();
        assert!(validate_session_id(id.as_str()).is_ok());
    }

    #[test]
    fn test_default_session() {
        assert_eq!(SessionId::default().as_str(), DEFAULT_SESSION_ID);
    }

    #[test]
    fn test_serde_validates() {
        let id: SessionId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(id.as_str(), "abc");
        assert!(serde_json::from_str::<SessionId>("\"a b\"").is_err());
    }
}
