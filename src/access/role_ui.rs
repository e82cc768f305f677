//! Role-driven UI affordances on a loaded page.

use crate::access::predicates::can_view_own_pets;
use crate::error::SelectorError;
use crate::markup::{Action, PageMarkup, Selector};
use crate::session::Session;
use crate::types::{normalize_role, Page};

/// Attribute listing the roles (comma-separated) that may see an element.
pub const ROLES_ATTR: &str = "data-roles";
/// Attribute marking the slot that shows "role | email".
pub const INDICATOR_ATTR: &str = "data-user-indicator";
/// Id of the navigation link to the pets listing.
pub const PETS_LINK_ID: &str = "linkMascotas";

/// Applies the session's role to the page.
///
/// Sets the indicator text, shows or hides every `data-roles` element, and points the
/// pets link at the own-patients view for veterinarians. Call it once the page
/// structure exists; calling it again yields the same state.
pub fn init_role_ui(session: &Session, page: &mut PageMarkup) {
    let indicator = Selector::Attribute { name: INDICATOR_ATTR.to_string(), value: None };
    if let Some(slot) = page.first_mut(&indicator) {
        slot.text = format!("{} | {}", session.role_label(), session.email);
    }

    let role = session.normalized_role();
    let tagged = Selector::Attribute { name: ROLES_ATTR.to_string(), value: None };
    let mut hidden = 0usize;
    for element in page.select_mut(&tagged) {
        let roles: Vec<String> = element
            .attr(ROLES_ATTR)
            .unwrap_or_default()
            .split(',')
            .map(normalize_role)
            .filter(|r| !r.is_empty())
            .collect();
        element.hidden = !roles.is_empty() && !roles.contains(&role);
        hidden += usize::from(element.hidden);
    }

    if let Some(link) = page.first_mut(&Selector::Id(PETS_LINK_ID.to_string())) {
        let (target, label) = if can_view_own_pets(session) {
            (Page::MyPets, "Mis mascotas")
        } else {
            (Page::Pets, "Mascotas")
        };
        link.href = Some(target.file_name().to_string());
        link.text = label.to_string();
    }

    tracing::debug!("Role UI applied for {:?}: {} element(s) hidden", role, hidden);
}

/// Wires logout to every element currently matching `selector`.
///
/// Elements added later are not wired. Returns the number of matching elements.
pub fn wire_logout(page: &mut PageMarkup, selector: &str) -> Result<usize, SelectorError> {
    let selector: Selector = selector.parse()?;
    let mut count = 0;
    for element in page.select_mut(&selector) {
        element.on_click(Action::Logout);
        count += 1;
    }
    tracing::debug!("Logout wired to {} element(s)", count);
    Ok(count)
}
