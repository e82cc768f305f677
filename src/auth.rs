//!
//! Credential checking for the login page.
//!
//! Passwords are stored as salted bcrypt hashes; a submitted password is only ever
//! compared through `bcrypt::verify`. Opening the session (persisting it and
//! redirecting) is done by [`Gate::login`](crate::access::Gate::login).

use rand_core::{OsRng, RngCore};

use crate::backend::UserDirectory;
use crate::error::AuthError;
use crate::session::Session;
use crate::types::NO_ROLE_LABEL;

/// What the login form submits.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials { email: email.into(), password: password.into() }
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Hashes a password with a fresh random 16-byte salt.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    let mut salt = [0u8; 16];
    OsRng.fill_bytes(&mut salt);
    let parts = bcrypt::hash_with_salt(password, cost, salt)?;
    Ok(parts.format_for_version(bcrypt::Version::TwoB))
}

/// Checks a password against a stored bcrypt hash.
///
/// A stored value that is not a bcrypt hash is an error, never a plaintext match.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    Ok(bcrypt::verify(password, hash)?)
}

/// Looks the user up and checks the password, producing the session to open.
pub fn authenticate<D>(directory: &D, credentials: &Credentials) -> Result<Session, AuthError>
where
    D: UserDirectory + ?Sized,
{
    let email = credentials.email.trim();
    if email.is_empty() || credentials.password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    let user = directory.find_by_email(email)?.ok_or(AuthError::UnknownUser)?;
    tracing::debug!("Directory returned user id {} for {}", user.id, email);

    let stored = user.password_hash().ok_or(AuthError::NoPasswordConfigured)?;
    if !verify_password(&credentials.password, stored)? {
        tracing::warn!("Password mismatch for user id {}", user.id);
        return Err(AuthError::WrongPassword);
    }

    let role_name = user.role_name().unwrap_or(NO_ROLE_LABEL).to_string();
    tracing::debug!("Login accepted for user id {} with role {}", user.id, role_name);

    Ok(Session {
        id: user.id,
        display_name: user.name.clone().unwrap_or_default(),
        email: user.email.clone(),
        phone: user.phone.clone(),
        role_id: user.role_id,
        role_name,
    })
}
