//!
//! Records the CRUD pages submit to the data service.
//!
//! Only required-field checks happen here; uniqueness and references are the data
//! service's job. Field names on the wire are the service's column names.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

use crate::error::EntityError;

fn required(field: &'static str, value: &str) -> Result<(), EntityError> {
    if value.trim().is_empty() {
        return Err(EntityError::MissingField(field));
    }
    Ok(())
}

fn invalid(field: &'static str, reason: impl Into<String>) -> EntityError {
    EntityError::InvalidField { field, reason: reason.into() }
}

/// A clinic client, keyed by phone number.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Client {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "paterno", default)]
    pub paternal_surname: Option<String>,
    #[serde(rename = "materno", default)]
    pub maternal_surname: Option<String>,
}

impl Client {
    pub fn validate(&self) -> Result<(), EntityError> {
        required("nombre", &self.name)?;
        required("telefono", &self.phone)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "raza_id", default)]
    pub breed_id: Option<i64>,
    #[serde(rename = "edad_anios", default)]
    pub age_years: Option<i32>,
    #[serde(rename = "edad_meses", default)]
    pub age_months: Option<i32>,
    #[serde(rename = "peso_kg", default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    /// Phone of the owning client.
    #[serde(rename = "cli_tel")]
    pub owner_phone: String,
    #[serde(rename = "diagnostico", default)]
    pub diagnosis: Option<String>,
    #[serde(rename = "tratamiento", default)]
    pub treatment: Option<String>,
}

impl Pet {
    pub fn validate(&self) -> Result<(), EntityError> {
        required("nombre", &self.name)?;
        required("cli_tel", &self.owner_phone)?;
        if matches!(self.age_years, Some(y) if y < 0) {
            return Err(invalid("edad_anios", "must not be negative"));
        }
        if matches!(self.age_months, Some(m) if !(0..12).contains(&m)) {
            return Err(invalid("edad_meses", "must be between 0 and 11"));
        }
        if let Some(w) = self.weight_kg {
            if !w.is_finite() || w < 0.0 {
                return Err(invalid("peso_kg", "must be a non-negative number"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Service {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "costo")]
    pub cost: f64,
    /// Minutes.
    #[serde(rename = "duracion", default)]
    pub duration: Option<u32>,
}

impl Service {
    pub fn validate(&self) -> Result<(), EntityError> {
        required("nombre", &self.name)?;
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(invalid("costo", "must be a non-negative number"));
        }
        if self.duration == Some(0) {
            return Err(invalid("duracion", "must be greater than zero"));
        }
        Ok(())
    }
}

pub const DEFAULT_APPOINTMENT_STATUS: &str = "PENDIENTE";

/// Appointment fields as submitted by the scheduling form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentForm {
    /// RFC 3339, or a local `YYYY-MM-DDTHH:MM[:SS]` from a datetime input.
    pub scheduled_at: String,
    pub pet_id: Option<i64>,
    pub service_id: Option<i64>,
    pub veterinarian_id: Option<String>,
    pub status: Option<String>,
    pub owner_phone: Option<String>,
}

/// A validated appointment, ready to insert or update.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Appointment {
    #[serde(rename = "fecha")]
    pub scheduled_at: DateTime<Utc>,
    #[serde(rename = "estado")]
    pub status: String,
    #[serde(rename = "servicios_id")]
    pub service_id: i64,
    #[serde(rename = "mascotas_id")]
    pub pet_id: i64,
    #[serde(rename = "veterinario_id")]
    pub veterinarian_id: String,
    #[serde(rename = "cli_tel", default)]
    pub owner_phone: Option<String>,
}

fn parse_schedule(raw: &str) -> Result<DateTime<Utc>, EntityError> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| invalid("fecha", e.to_string()))?;
    Local
        .from_local_datetime(&naive)
        .single()
        .map(|at| at.with_timezone(&Utc))
        .ok_or_else(|| invalid("fecha", "ambiguous or non-existent local time"))
}

impl AppointmentForm {
    pub fn validate(self) -> Result<Appointment, EntityError> {
        let raw = self.scheduled_at.trim();
        required("fecha", raw)?;
        let pet_id = self.pet_id.ok_or(EntityError::MissingField("mascotas_id"))?;
        let service_id = self.service_id.ok_or(EntityError::MissingField("servicios_id"))?;
        let veterinarian_id = self
            .veterinarian_id
            .filter(|v| !v.trim().is_empty())
            .ok_or(EntityError::MissingField("veterinario_id"))?;
        let scheduled_at = parse_schedule(raw)?;
        let status = self
            .status
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_APPOINTMENT_STATUS.to_string());
        Ok(Appointment {
            scheduled_at,
            status,
            service_id,
            pet_id,
            veterinarian_id,
            owner_phone: self.owner_phone,
        })
    }
}

/// Whether an account form creates a new account or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}

/// User account fields as submitted by the accounts form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub role_id: Option<i64>,
    /// Plain password; hash it with [`Gate::hash_password`](crate::access::Gate::hash_password)
    /// before it leaves the page.
    pub password: Option<String>,
}

impl AccountForm {
    pub fn validate(&self, mode: FormMode) -> Result<(), EntityError> {
        required("nombre", &self.name)?;
        required("correo", &self.email)?;
        if !self.email.contains('@') {
            return Err(invalid("correo", "not an email address"));
        }
        if self.role_id.is_none() {
            return Err(EntityError::MissingField("rol_id"));
        }
        let has_password = self.password.as_deref().is_some_and(|p| !p.trim().is_empty());
        if mode == FormMode::Create && !has_password {
            return Err(EntityError::MissingField("contraseña"));
        }
        Ok(())
    }
}
