//! Role and capability predicates.
//!
//! Role predicates compare the normalized role label; capability predicates read the
//! table in [`crate::rights`]. Page code asks these, never the raw role string.

use crate::rights::caps;
use crate::session::Session;
use crate::types::Role;

pub fn is_admin(session: &Session) -> bool {
    session.role() == Some(Role::Administrator)
}

pub fn is_veterinarian(session: &Session) -> bool {
    session.role() == Some(Role::Veterinarian)
}

pub fn is_receptionist(session: &Session) -> bool {
    session.role() == Some(Role::Receptionist)
}

pub fn can_view_accounts(session: &Session) -> bool {
    session.can(caps::VIEW_ACCOUNTS)
}

pub fn can_edit_accounts(session: &Session) -> bool {
    session.can(caps::EDIT_ACCOUNTS)
}

pub fn can_schedule_appointments(session: &Session) -> bool {
    session.can(caps::SCHEDULE_APPOINTMENTS)
}

pub fn can_view_own_appointments(session: &Session) -> bool {
    session.can(caps::VIEW_OWN_APPOINTMENTS)
}

/// Veterinarians get their own-patients listing instead of the full one.
pub fn can_view_own_pets(session: &Session) -> bool {
    session.can(caps::VIEW_OWN_PETS)
}

pub fn can_edit_clinical_fields(session: &Session) -> bool {
    session.can(caps::EDIT_CLINICAL_FIELDS)
}

pub fn can_edit_pets(session: &Session) -> bool {
    session.can(caps::EDIT_PETS)
}

/// Veterinarians see clients read-only.
pub fn can_edit_clients(session: &Session) -> bool {
    session.can(caps::EDIT_CLIENTS)
}

pub fn can_manage_services(session: &Session) -> bool {
    session.can(caps::MANAGE_SERVICES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_role(role: &str) -> Session {
        Session {
            id: 1,
            display_name: String::new(),
            email: "x@clinica.mx".into(),
            phone: None,
            role_id: None,
            role_name: role.into(),
        }
    }

    #[test]
    fn test_role_predicates_are_exclusive() {
        let admin = with_role(" Administrador ");
        let vet = with_role("veterinario");
        let recep = with_role("RECEPCIONISTA");
        assert!(is_admin(&admin) && !is_veterinarian(&admin) && !is_receptionist(&admin));
        assert!(!is_admin(&vet) && is_veterinarian(&vet) && !is_receptionist(&vet));
        assert!(!is_admin(&recep) && !is_veterinarian(&recep) && is_receptionist(&recep));

        let nobody = with_role("Sin rol");
        assert!(!is_admin(&nobody) && !is_veterinarian(&nobody) && !is_receptionist(&nobody));
    }

    #[test]
    fn test_capability_predicates_follow_table() {
        let admin = with_role("Administrador");
        assert!(can_view_accounts(&admin) && can_edit_accounts(&admin));
        assert!(can_schedule_appointments(&admin) && can_edit_clinical_fields(&admin));
        assert!(!can_view_own_pets(&admin));

        let vet = with_role("Veterinario");
        assert!(can_view_own_appointments(&vet) && can_view_own_pets(&vet));
        assert!(can_edit_clinical_fields(&vet));
        assert!(!can_edit_clients(&vet) && !can_edit_pets(&vet) && !can_schedule_appointments(&vet));

        let recep = with_role("Recepcionista");
        assert!(can_schedule_appointments(&recep) && can_manage_services(&recep));
        assert!(!can_view_accounts(&recep) && !can_edit_clinical_fields(&recep));
    }
}
