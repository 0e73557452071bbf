//! Sign-in credentials value object.

use std::fmt;

use zeroize::Zeroizing;

/// Username and password pair entered on the sign-in screen.
///
/// The password is wiped from memory on drop and never appears in
/// `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Creates credentials, trimming surrounding whitespace from both parts.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into().trim().to_string(),
            password: Zeroizing::new(password.into().trim().to_string()),
        }
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns whether both parts are non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_whitespace() {
        let creds = Credentials::new("  alice ", " hunter2\n");
        assert_eq!(creds.username(), "alice");
        assert_eq!(creds.password(), "hunter2");
    }

    #[test]
    fn test_completeness() {
        assert!(Credentials::new("alice", "pw").is_complete());
        assert!(!Credentials::new("alice", "   ").is_complete());
        assert!(!Credentials::new("", "pw").is_complete());
    }

    #[test]
    fn test_debug_does_not_leak_password() {
        let creds = Credentials::new("alice", "hunter2");
        let debug_output = format!("{creds:?}");
        assert!(!debug_output.contains("hunter2"));
    }
}
