//! Signed-in user identity.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Errors from identity construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The display name was empty
    #[error("identity must be a non-empty name")]
    Empty,
}

/// The signed-in user's display name, used as the partition key for all
/// remote operations.
///
/// An `Identity` exists only between a successful sign-in and the next
/// sign-out; it is owned by the session state and cloned into request
/// stamps so late responses can be matched against the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Creates an identity from a display name. Empty names are rejected;
    /// anything else passes, since sign-in is a display-name gate and not
    /// credential verification.
    pub fn new(name: impl Into<String>) -> Result<Self, IdentityError> {
        let name = name.into();
        if name.is_empty() {
            return Err(IdentityError::Empty);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_name() {
        assert_eq!(Identity::new(""), Err(IdentityError::Empty));
    }

    #[test]
    fn test_accepts_any_non_empty_name() {
        let identity = Identity::new("al").unwrap();
        assert_eq!(identity.as_str(), "al");
        assert_eq!(identity.to_string(), "al");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let identity = Identity::new("al").unwrap();
        assert_eq!(serde_json::to_string(&identity).unwrap(), "\"al\"");
    }
}
