// Error types for the account store. The UI turns these into short
// messages and goes back to the menu; nothing here is retried.

use thiserror::Error;

/// Everything that can go wrong while talking to the account store.
#[derive(Error, Debug)]
pub enum AccountError {
    /// The database file or its directory could not be opened or
    /// created, or a statement failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Another account already uses this email.
    #[error("An account with email {0} already exists")]
    DuplicateEmail(String),

    /// The action needs a logged-in user.
    #[error("You must be logged in to do this")]
    NotAuthenticated,

    /// Confirmation email or password does not match the session.
    #[error("Email or password does not match")]
    CredentialMismatch,

    /// Malformed input. Not raised by the store, which accepts any text.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result alias used by the store.
pub type AccountResult<T> = Result<T, AccountError>;

impl From<rusqlite::Error> for AccountError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<std::io::Error> for AccountError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl AccountError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Map an insert failure to `DuplicateEmail` when SQLite reports a
    /// UNIQUE violation, otherwise keep it as a storage error.
    pub(crate) fn from_insert(err: rusqlite::Error, email: &str) -> Self {
        if let rusqlite::Error::SqliteFailure(e, _) = &err {
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
                return Self::DuplicateEmail(email.to_string());
            }
        }
        err.into()
    }
}
