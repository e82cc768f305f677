//!
//! Defines error types for the access gate and its collaborators.

/// Errors raised by a [`SessionStorage`](crate::storage::SessionStorage) backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The underlying medium could not be read or written.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The session record could not be encoded for storage.
    #[error("Session encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
    /// The storage key is not usable by this backend (e.g. contains a path separator).
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Failure reported by the hosted data service.
///
/// The service message is kept verbatim so the presentation layer can show it as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The service answered with a non-null `error`.
    #[error("{message}")]
    Service {
        message: String,
        code: Option<String>,
    },
    /// The reply could not be understood.
    #[error("Malformed service reply: {0}")]
    MalformedReply(String),
}

/// Errors that can occur while checking credentials and opening a session.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Email or password was blank.
    #[error("Email and password are required")]
    MissingCredentials,
    /// No user with the given email exists in the directory.
    #[error("No user found for that email")]
    UnknownUser,
    /// The user exists but has no account password configured.
    #[error("This account has no password configured")]
    NoPasswordConfigured,
    /// The submitted password does not match the stored hash.
    #[error("Incorrect password")]
    WrongPassword,
    /// The user directory failed.
    #[error("User directory error: {0}")]
    Backend(#[from] BackendError),
    /// Hashing or verification failed (e.g. the stored hash is corrupt).
    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    /// The session could not be persisted.
    #[error("Could not persist session: {0}")]
    Storage(#[from] StorageError),
}

/// Required-field violations on CRUD records, checked before submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityError {
    #[error("Field `{0}` is required")]
    MissingField(&'static str),
    #[error("Field `{field}` is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// A selector string the page model does not understand.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported selector `{0}`: expected `#id`, `.class`, `[attr]` or `[attr=value]`")]
pub struct SelectorError(pub String);
