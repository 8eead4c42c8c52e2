//! Owner session.
//!
//! The owner password is a convenience gate, not a security boundary: it is
//! held in memory and sent with every write so the remote endpoint can check
//! it. It is passed explicitly to each mutating call rather than read from
//! shared state.

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Password required. Access denied.")]
    PasswordRequired,
}

/// The owner password. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Build a credential from user input; surrounding whitespace is trimmed.
    pub fn new(password: &str) -> Result<Self, SessionError> {
        let trimmed = password.trim();
        if trimmed.is_empty() {
            return Err(SessionError::PasswordRequired);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The password as sent in write payloads.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl Drop for Credential {
    fn drop(&mut self) {
        // Overwrite in place before the buffer is released.
        let len = self.0.len();
        self.0.replace_range(.., &"\0".repeat(len));
        self.0.clear();
    }
}

/// Visitor or owner mode.
#[derive(Debug, Default)]
pub struct Session {
    credential: Option<Credential>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter owner mode. A blank password leaves the session unchanged.
    pub fn login(&mut self, password: &str) -> Result<(), SessionError> {
        self.credential = Some(Credential::new(password)?);
        tracing::info!("owner mode enabled");
        Ok(())
    }

    /// Leave owner mode and forget the password.
    pub fn logout(&mut self) {
        if self.credential.take().is_some() {
            tracing::info!("owner mode disabled");
        }
    }

    pub fn is_owner(&self) -> bool {
        self.credential.is_some()
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }
}
