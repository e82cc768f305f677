//!
//! The session record identifying the current actor.
//!
//! A session is persisted as a single JSON object. Writes use the camelCase field
//! names (`id`, `displayName`, `email`, `phone`, `roleId`, `roleName`); reads also
//! accept the keys written by the earlier front end (`nombre`, `user`/`correo`,
//! `telefono`, `rolId`, `rolNombre`/`rol`) so existing browser sessions survive an
//! upgrade.

use serde::Deserialize;

use crate::rights::{self, CapabilityMask};
use crate::types::{normalize_role, Role, NO_ROLE_LABEL};

/// The client-held record identifying the current actor and role.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredSession")]
pub struct Session {
    /// Directory id of the user.
    pub id: i64,
    pub display_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role_id: Option<i64>,
    /// Role label as stored by the directory, not normalized.
    pub role_name: String,
}

/// Every key a stored record may carry, current and legacy.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSession {
    id: i64,
    display_name: Option<String>,
    nombre: Option<String>,
    email: Option<String>,
    user: Option<String>,
    correo: Option<String>,
    phone: Option<String>,
    telefono: Option<String>,
    role_id: Option<i64>,
    rol_id: Option<i64>,
    role_name: Option<String>,
    rol_nombre: Option<String>,
    rol: Option<String>,
}

/// First candidate that is present and non-empty.
fn first_filled<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates.into_iter().flatten().find(|value| !value.is_empty())
}

impl From<StoredSession> for Session {
    fn from(raw: StoredSession) -> Self {
        Session {
            id: raw.id,
            display_name: first_filled([raw.display_name, raw.nombre]).unwrap_or_default(),
            email: first_filled([raw.email, raw.user, raw.correo]).unwrap_or_default(),
            phone: first_filled([raw.phone, raw.telefono]),
            role_id: raw.role_id.or(raw.rol_id),
            role_name: first_filled([raw.role_name, raw.rol_nombre, raw.rol]).unwrap_or_default(),
        }
    }
}

impl Session {
    /// Decodes a persisted session. Anything that is not a well-formed record is an error.
    ///
    /// Only a JSON object is a record; arrays are refused even where the fields would line up.
    pub fn from_json(raw: &str) -> Result<Session, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(serde::de::Error::custom("session record must be a JSON object"));
        }
        serde_json::from_value(value)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// The role label trimmed and lower-cased, as used in every comparison.
    pub fn normalized_role(&self) -> String {
        normalize_role(&self.role_name)
    }

    /// The recognised role, if the label is one of the clinic roles.
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role_name)
    }

    /// Label for display, falling back to "Sin rol".
    pub fn role_label(&self) -> &str {
        match self.role_name.trim() {
            "" => NO_ROLE_LABEL,
            label => label,
        }
    }

    /// Capabilities granted by the session's role.
    pub fn capabilities(&self) -> CapabilityMask {
        rights::granted(self.role())
    }

    /// Whether the session holds every capability in `need`.
    pub fn can(&self, need: CapabilityMask) -> bool {
        rights::sufficient(self.capabilities(), need)
    }
}
