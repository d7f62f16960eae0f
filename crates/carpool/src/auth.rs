//! Editor logins and view modes.
//!
//! Anyone may read the roster as a visitor. Submitting and deleting days
//! needs an editor session, obtained by checking a username and password
//! against the users held by the record store. Passwords are stored as
//! salted Argon2 hashes in PHC string form.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::store::RecordStore;

/// A stored login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Login name.
    pub username: String,
    /// Argon2 PHC string of the password.
    pub password_hash: String,
}

impl User {
    /// Create a user from a plaintext password.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PasswordHash`] if the password cannot be hashed.
    pub fn new(username: impl Into<String>, password: &str) -> Result<Self> {
        Ok(Self {
            username: username.into(),
            password_hash: hash_password(password)?,
        })
    }

    /// Check a plaintext password against the stored hash.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        match PasswordHash::new(&self.password_hash) {
            Ok(stored) => Argon2::default()
                .verify_password(password.as_bytes(), &stored)
                .is_ok(),
            Err(_) => {
                warn!("Stored password hash for {} is malformed", self.username);
                false
            }
        }
    }
}

/// Hash a password for storage under a fresh random salt.
///
/// # Errors
///
/// Returns [`Error::PasswordHash`] if hashing fails.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::PasswordHash {
            message: e.to_string(),
        })?;
    Ok(hash.to_string())
}

/// What a session may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// May submit and delete days.
    Editor,
    /// Read-only.
    Visitor,
}

/// An authenticated (or anonymous) caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: Option<String>,
    mode: ViewMode,
}

impl Session {
    /// An anonymous read-only session.
    #[must_use]
    pub fn visitor() -> Self {
        Self {
            username: None,
            mode: ViewMode::Visitor,
        }
    }

    /// The session's view mode.
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// The logged-in user, if any.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Whether the session may modify records.
    #[must_use]
    pub fn is_editor(&self) -> bool {
        self.mode == ViewMode::Editor
    }

    /// Fail unless this is an editor session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] naming `operation` for visitors.
    pub fn require_editor(&self, operation: &'static str) -> Result<()> {
        if self.is_editor() {
            Ok(())
        } else {
            Err(Error::Unauthorized { operation })
        }
    }
}

/// Log in as an editor.
///
/// # Errors
///
/// Returns [`Error::InvalidCredentials`] for an unknown user or a wrong
/// password (the two are not distinguished), or a store error.
pub fn authenticate<S: RecordStore + ?Sized>(
    store: &S,
    username: &str,
    password: &str,
) -> Result<Session> {
    match store.find_user(username)? {
        Some(user) if user.verify(password) => {
            debug!("Authenticated {}", username);
            Ok(Session {
                username: Some(user.username),
                mode: ViewMode::Editor,
            })
        }
        _ => {
            warn!("Failed login for {}", username);
            Err(Error::InvalidCredentials)
        }
    }
}

/// Create or replace an editor login on behalf of `session`.
///
/// Only an editor may add logins, except while the store has none: the
/// first login can be created from a visitor session.
///
/// # Errors
///
/// Returns [`Error::Unauthorized`] if logins exist and `session` is not an
/// editor, [`Error::PasswordHash`] if hashing fails, or a store error.
pub fn register_user<S: RecordStore + ?Sized>(
    store: &S,
    session: &Session,
    username: &str,
    password: &str,
) -> Result<()> {
    if store.count_users()? == 0 {
        info!("No logins yet; creating first editor {}", username);
    } else {
        session.require_editor("add user")?;
    }
    store.put_user(&User::new(username, password)?)?;
    info!("Saved user {}", username);
    Ok(())
}
