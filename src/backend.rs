//!
//! Seam to the hosted data service.
//!
//! The service answers every call with a `{ data, error }` pair; a non-null `error`
//! is the only failure signal. Only the read the login glue needs is modelled here:
//! a user row together with its embedded role and account.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::BackendError;

/// The `error` half of a service reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceFault {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl From<ServiceFault> for BackendError {
    fn from(fault: ServiceFault) -> Self {
        BackendError::Service { message: fault.message, code: fault.code }
    }
}

/// A raw `{ data, error }` reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceReply<T> {
    // Missing `Option` fields deserialize as `None`.
    pub data: Option<T>,
    pub error: Option<ServiceFault>,
}

impl<T: DeserializeOwned> ServiceReply<T> {
    pub fn from_json(raw: &str) -> Result<Self, BackendError> {
        serde_json::from_str(raw).map_err(|e| BackendError::MalformedReply(e.to_string()))
    }
}

impl<T> ServiceReply<T> {
    /// `Err` whenever `error` is set, regardless of `data`.
    pub fn into_result(self) -> Result<Option<T>, BackendError> {
        match self.error {
            Some(fault) => Err(fault.into()),
            None => Ok(self.data),
        }
    }
}

/// An embedded relation, which the service returns either as one object or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Embedded<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Embedded<T> {
    pub fn first(&self) -> Option<&T> {
        match self {
            Embedded::Many(items) => items.first(),
            Embedded::One(item) => Some(item),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleRef {
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountRef {
    /// bcrypt hash of the account password.
    #[serde(rename = "password_hash", alias = "contraseña", default)]
    pub password_hash: Option<String>,
}

/// A `usuarios` row with its `roles` and `cuenta` relations embedded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "rol_id", default)]
    pub role_id: Option<i64>,
    #[serde(rename = "roles", default)]
    pub role: Option<RoleRef>,
    #[serde(rename = "cuenta", default)]
    pub account: Option<Embedded<AccountRef>>,
}

impl UserRecord {
    /// Role label from the embedded relation, trimmed; `None` when absent or blank.
    pub fn role_name(&self) -> Option<&str> {
        self.role
            .as_ref()
            .and_then(|r| r.name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Stored password hash of the first linked account, if any.
    pub fn password_hash(&self) -> Option<&str> {
        self.account
            .as_ref()
            .and_then(Embedded::first)
            .and_then(|a| a.password_hash.as_deref())
            .filter(|hash| !hash.is_empty())
    }
}

/// Lookup of users by email.
pub trait UserDirectory {
    /// Case-insensitive exact match on email. More than one match is an error.
    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, BackendError>;
}

/// In-process directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    users: Vec<UserRecord>,
    fault: Option<BackendError>,
}

impl MemoryDirectory {
    pub fn new(users: Vec<UserRecord>) -> Self {
        MemoryDirectory { users, fault: None }
    }

    /// Loads rows from a `{ data: [...], error }` reply.
    pub fn from_reply(raw: &str) -> Result<Self, BackendError> {
        let users = ServiceReply::<Vec<UserRecord>>::from_json(raw)?
            .into_result()?
            .unwrap_or_default();
        Ok(Self::new(users))
    }

    /// Makes every lookup fail with the given service message.
    pub fn failing(message: &str) -> Self {
        MemoryDirectory {
            users: Vec::new(),
            fault: Some(BackendError::Service { message: message.to_string(), code: None }),
        }
    }

    pub fn insert(&mut self, user: UserRecord) {
        self.users.push(user);
    }
}

impl UserDirectory for MemoryDirectory {
    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, BackendError> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }
        let needle = email.to_lowercase();
        let mut matches = self.users.iter().filter(|u| u.email.to_lowercase() == needle);
        let found = matches.next().cloned();
        if matches.next().is_some() {
            return Err(BackendError::Service {
                message: "JSON object requested, multiple (or no) rows returned".into(),
                code: Some("PGRST116".into()),
            });
        }
        Ok(found)
    }
}
