//! Protected views and the context the gate hands them.

use crate::navigation::Location;
use crate::session::Session;
use crate::types::Page;

/// A page whose state can only be built through [`Gate::enter`](crate::access::Gate::enter).
///
/// The gate checks `PAGE`'s role list and capability before calling `build`, so a
/// view never runs without an admitted session.
pub trait ProtectedView: Sized {
    const PAGE: Page;

    fn build(ctx: PageContext) -> Self;
}

/// The admitted session plus the location the view was opened at.
///
/// Only the gate can create one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    session: Session,
    location: Location,
}

impl PageContext {
    pub(crate) fn new(session: Session, location: Location) -> Self {
        PageContext { session, location }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.location.query_param(key)
    }

    pub fn into_session(self) -> Session {
        self.session
    }
}
