// Shared types used across the gate: roles and the page catalogue.
// The capability bits live in `rights.rs`; this file only refers to them.

use crate::rights::{caps, CapabilityMask};

/// Role label shown when a session carries no role at all.
pub const NO_ROLE_LABEL: &str = "Sin rol";

/// Normalizes a role label for comparison: trimmed and lower-cased.
///
/// `" Administrador "` and `"administrador"` normalize to the same value.
pub fn normalize_role(label: &str) -> String {
    label.trim().to_lowercase()
}

/// The fixed set of clinic roles.
///
/// The wire labels are the ones stored by the user directory
/// (`Administrador`, `Veterinario`, `Recepcionista`). Any other label parses to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Role {
    #[serde(rename = "Administrador")]
    Administrator,
    #[serde(rename = "Veterinario")]
    Veterinarian,
    #[serde(rename = "Recepcionista")]
    Receptionist,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Administrator, Role::Veterinarian, Role::Receptionist];

    /// Parses a role label, case-insensitively and ignoring surrounding whitespace.
    pub fn parse(label: &str) -> Option<Role> {
        match normalize_role(label).as_str() {
            "administrador" => Some(Role::Administrator),
            "veterinario" => Some(Role::Veterinarian),
            "recepcionista" => Some(Role::Receptionist),
            _ => None,
        }
    }

    /// Canonical label as stored by the directory.
    pub fn label(self) -> &'static str {
        match self {
            Role::Administrator => "Administrador",
            Role::Veterinarian => "Veterinario",
            Role::Receptionist => "Recepcionista",
        }
    }

    /// Where a freshly logged-in user of this role lands.
    pub fn landing_page(self) -> Page {
        match self {
            Role::Administrator => Page::Index,
            Role::Receptionist => Page::ReceptionPanel,
            Role::Veterinarian => Page::MyAppointments,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// --- Pages -----------------------------------------------------------------

const EVERYONE: &[Role] = &[Role::Administrator, Role::Receptionist, Role::Veterinarian];
const FRONT_DESK: &[Role] = &[Role::Administrator, Role::Receptionist];
const ADMIN_ONLY: &[Role] = &[Role::Administrator];
const VET_ONLY: &[Role] = &[Role::Veterinarian];

/// Every page of the clinic front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Login,
    Index,
    ReceptionPanel,
    Appointments,
    MyAppointments,
    Clients,
    Pets,
    MyPets,
    PetDetail,
    Services,
    Accounts,
    AddAppointment,
    AddClient,
    AddPet,
    AddService,
    AddAccount,
}

impl Page {
    pub const ALL: [Page; 16] = [
        Page::Login,
        Page::Index,
        Page::ReceptionPanel,
        Page::Appointments,
        Page::MyAppointments,
        Page::Clients,
        Page::Pets,
        Page::MyPets,
        Page::PetDetail,
        Page::Services,
        Page::Accounts,
        Page::AddAppointment,
        Page::AddClient,
        Page::AddPet,
        Page::AddService,
        Page::AddAccount,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Page::Login => "login.html",
            Page::Index => "index.html",
            Page::ReceptionPanel => "recepcionpanel.html",
            Page::Appointments => "citas.html",
            Page::MyAppointments => "mis_citas.html",
            Page::Clients => "clientes.html",
            Page::Pets => "mascotas.html",
            Page::MyPets => "mis_mascotas.html",
            Page::PetDetail => "detalle_mascota.html",
            Page::Services => "servicios.html",
            Page::Accounts => "cuentas.html",
            Page::AddAppointment => "add_cita.html",
            Page::AddClient => "add_cliente.html",
            Page::AddPet => "add_mascota.html",
            Page::AddService => "add_servicio.html",
            Page::AddAccount => "add_cuenta.html",
        }
    }

    /// Looks a page up by its file name (the last path segment of an href).
    pub fn from_file_name(name: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|p| p.file_name() == name)
    }

    /// Roles admitted to the page. Empty for the public login page.
    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Page::Login => &[],
            Page::Index
            | Page::Appointments
            | Page::Clients
            | Page::Pets
            | Page::PetDetail
            | Page::AddClient
            | Page::AddPet => EVERYONE,
            Page::ReceptionPanel
            | Page::Services
            | Page::AddAppointment
            | Page::AddService => FRONT_DESK,
            Page::Accounts | Page::AddAccount => ADMIN_ONLY,
            Page::MyAppointments | Page::MyPets => VET_ONLY,
        }
    }

    /// Capability checked after the role list, if the page needs one.
    pub fn required_capability(self) -> Option<CapabilityMask> {
        match self {
            Page::Appointments => Some(caps::SCHEDULE_APPOINTMENTS),
            Page::Accounts => Some(caps::VIEW_ACCOUNTS),
            Page::AddAccount => Some(caps::EDIT_ACCOUNTS),
            _ => None,
        }
    }

    /// Message for a user whose role reaches the page but who lacks its capability.
    pub fn capability_notice(self) -> &'static str {
        match self {
            Page::Appointments => "No tienes permiso para programar o administrar citas.",
            Page::Accounts => "No tienes permisos para ver las cuentas.",
            Page::AddAccount => "No tienes permisos para administrar cuentas.",
            _ => "Acceso restringido.",
        }
    }

    /// Where a user lacking the page's capability is sent instead.
    pub fn capability_fallback(self) -> Page {
        match self {
            Page::AddAccount => Page::Accounts,
            _ => Page::Index,
        }
    }

    pub fn is_public(self) -> bool {
        matches!(self, Page::Login)
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}
