//!
//! Capability table for the clinic roles.
//! Defines the capability bit flags, the static role → capabilities table, and
//! helpers to check a held mask against a required one. Every permission decision
//! in the crate goes through [`granted`] and [`sufficient`].

use crate::types::Role;

/// A set of capabilities, one bit per capability.
pub type CapabilityMask = u32;

/// Capability bit flags.
pub mod caps {
    use super::CapabilityMask;

    /// List and open user accounts.
    pub const VIEW_ACCOUNTS: CapabilityMask = 1 << 0;
    /// Create, edit and delete user accounts. Implies `VIEW_ACCOUNTS`.
    pub const EDIT_ACCOUNTS: CapabilityMask = 1 << 1;
    /// Create and manage appointments for any veterinarian.
    pub const SCHEDULE_APPOINTMENTS: CapabilityMask = 1 << 2;
    /// See the appointments assigned to oneself.
    pub const VIEW_OWN_APPOINTMENTS: CapabilityMask = 1 << 3;
    /// See the pets seen in one's own appointments.
    pub const VIEW_OWN_PETS: CapabilityMask = 1 << 4;
    /// Change clinical fields (weight, notes) of a pet.
    pub const EDIT_CLINICAL_FIELDS: CapabilityMask = 1 << 5;
    /// Create, edit and delete pet records.
    pub const EDIT_PETS: CapabilityMask = 1 << 6;
    /// Create, edit and delete client records.
    pub const EDIT_CLIENTS: CapabilityMask = 1 << 7;
    /// Create, edit and delete services.
    pub const MANAGE_SERVICES: CapabilityMask = 1 << 8;

    /// Every defined capability.
    pub const ALL: CapabilityMask = (1 << 9) - 1;
}

/// Capabilities held by a role. A session without a recognised role holds none.
pub fn granted(role: Option<Role>) -> CapabilityMask {
    let mask = match role {
        Some(Role::Administrator) => {
            caps::EDIT_ACCOUNTS
                | caps::SCHEDULE_APPOINTMENTS
                | caps::EDIT_CLINICAL_FIELDS
                | caps::EDIT_PETS
                | caps::EDIT_CLIENTS
                | caps::MANAGE_SERVICES
        }
        Some(Role::Veterinarian) => {
            caps::VIEW_OWN_APPOINTMENTS | caps::VIEW_OWN_PETS | caps::EDIT_CLINICAL_FIELDS
        }
        Some(Role::Receptionist) => {
            caps::SCHEDULE_APPOINTMENTS | caps::EDIT_PETS | caps::EDIT_CLIENTS | caps::MANAGE_SERVICES
        }
        None => 0,
    };
    canonicalise(mask)
}

/// Adds implied capabilities to a mask (`EDIT_ACCOUNTS` implies `VIEW_ACCOUNTS`).
#[inline]
pub fn canonicalise(mask: CapabilityMask) -> CapabilityMask {
    let mut m = mask;
    if (m & caps::EDIT_ACCOUNTS) == caps::EDIT_ACCOUNTS {
        m |= caps::VIEW_ACCOUNTS;
    }
    m
}

/// Checks that `have` covers every bit of `need`, after canonicalising `have`.
#[inline]
pub fn sufficient(have: CapabilityMask, need: CapabilityMask) -> bool {
    (canonicalise(have) & need) == need
}
