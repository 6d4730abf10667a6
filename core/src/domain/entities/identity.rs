//! Authenticated identity handed over by the credential-checking collaborator.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A user whose credentials have already been verified upstream.
///
/// The token service trusts this value completely; it only signs what it is
/// given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    subject: String,
    roles: BTreeSet<String>,
}

impl Identity {
    /// Creates an identity from a subject and any collection of role names
    pub fn new<I, S>(subject: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subject: subject.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Unique user identifier (the username in the pension portal)
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_are_deduplicated_and_ordered() {
        let identity = Identity::new("alice", ["USER", "ADMIN", "USER"]);
        let roles: Vec<&str> = identity.roles().iter().map(String::as_str).collect();
        assert_eq!(roles, vec!["ADMIN", "USER"]);
        assert_eq!(identity.subject(), "alice");
    }

    #[test]
    fn test_identity_without_roles() {
        let identity = Identity::new("bob", Vec::<String>::new());
        assert!(identity.roles().is_empty());
    }
}
