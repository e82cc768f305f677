//!
//! The session and access gate.
//!
//! The gate owns the storage holding the session and the navigator performing
//! redirects. A failed check redirects exactly once and comes back as a [`Denial`];
//! nothing is shown to the user from here.

use crate::access::view::{PageContext, ProtectedView};
use crate::auth::{self, Credentials};
use crate::backend::UserDirectory;
use crate::config::GateConfig;
use crate::error::{AuthError, StorageError};
use crate::markup::Action;
use crate::navigation::{Location, Navigator};
use crate::rights::CapabilityMask;
use crate::session::Session;
use crate::storage::SessionStorage;
use crate::types::{normalize_role, Page, Role};

/// Notice for a user whose role may not open the page.
pub const RESTRICTED_NOTICE: &str = "Acceso restringido.";

/// Why a page refused to open.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Denial {
    /// Nobody is logged in (or the stored session was unreadable).
    #[error("No active session")]
    NoSession,
    /// The session's role is not in the page's allowed list. The session has been closed.
    #[error("Role `{role}` is not allowed here")]
    RoleNotPermitted { role: String },
    /// The role reaches the page but lacks a capability it requires.
    #[error("{page} requires capabilities {missing:#x}")]
    MissingCapability { page: Page, missing: CapabilityMask },
}

impl Denial {
    /// Where the gate sent the user.
    pub fn redirect(&self) -> Location {
        match self {
            Denial::NoSession | Denial::RoleNotPermitted { .. } => Location::new(Page::Login),
            Denial::MissingCapability { page, .. } => Location::new(page.capability_fallback()),
        }
    }

    /// Text the presentation layer should show, if any. A missing session is silent.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Denial::NoSession => None,
            Denial::RoleNotPermitted { .. } => Some(RESTRICTED_NOTICE),
            Denial::MissingCapability { page, .. } => Some(page.capability_notice()),
        }
    }
}

/// Gates pages behind the persisted session.
#[derive(Debug)]
pub struct Gate<S, N> {
    storage: S,
    navigator: N,
    config: GateConfig,
}

impl<S: SessionStorage, N: Navigator> Gate<S, N> {
    pub fn new(storage: S, navigator: N) -> Self {
        Self::with_config(storage, navigator, GateConfig::default())
    }

    pub fn with_config(storage: S, navigator: N, config: GateConfig) -> Self {
        Gate { storage, navigator, config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// The persisted session, if there is a well-formed one.
    ///
    /// Unreadable storage and malformed records both read as "logged out".
    pub fn current_user(&self) -> Option<Session> {
        let raw = match self.storage.get(&self.config.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!("Could not read session from storage: {}", e);
                return None;
            }
        };
        match Session::from_json(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Ignoring malformed session record: {}", e);
                None
            }
        }
    }

    /// Admits the current session if its role is in `allowed`.
    ///
    /// An empty `allowed` admits any logged-in user. Comparison is trimmed and
    /// case-insensitive; blank entries match nobody.
    pub fn require_login<R: AsRef<str>>(&self, allowed: &[R]) -> Result<Session, Denial> {
        let allowed: Vec<String> = allowed.iter().map(|r| normalize_role(r.as_ref())).collect();
        self.admit(&allowed)
    }

    /// Admits the current session to `page`: its role list first, then its capability.
    pub fn require_page(&self, page: Page) -> Result<Session, Denial> {
        let allowed: Vec<String> = page
            .allowed_roles()
            .iter()
            .map(|role| normalize_role(role.label()))
            .collect();
        let session = self.admit(&allowed)?;

        if let Some(need) = page.required_capability() {
            if !session.can(need) {
                let denial = Denial::MissingCapability { page, missing: need & !session.capabilities() };
                tracing::warn!("User id {} denied {}: {}", session.id, page, denial);
                self.navigator.redirect(&denial.redirect());
                return Err(denial);
            }
        }
        Ok(session)
    }

    /// Builds a protected view. The view only exists if the gate admitted the session.
    pub fn enter<V: ProtectedView>(&self) -> Result<V, Denial> {
        self.enter_with(Location::new(V::PAGE))
    }

    /// Like [`Gate::enter`], carrying the query of `location` into the view.
    ///
    /// The page checked is always the view's own, whatever `location` names.
    pub fn enter_with<V: ProtectedView>(&self, location: Location) -> Result<V, Denial> {
        let session = self.require_page(V::PAGE)?;
        let location = Location { page: V::PAGE, query: location.query };
        Ok(V::build(PageContext::new(session, location)))
    }

    /// Clears the session and sends the user to the login page.
    ///
    /// The redirect happens even if the storage could not be cleared.
    pub fn logout(&self) -> Result<(), StorageError> {
        tracing::debug!("Closing session");
        let cleared = self.clear_session();
        self.navigator.redirect(&Location::new(Page::Login));
        cleared
    }

    /// Runs an action wired to a page element.
    pub fn perform(&self, action: Action) -> Result<(), StorageError> {
        match action {
            Action::Logout => self.logout(),
        }
    }

    /// Checks credentials, persists the new session and redirects to the role's landing page.
    pub fn login<D>(&self, directory: &D, credentials: &Credentials) -> Result<Session, AuthError>
    where
        D: UserDirectory + ?Sized,
    {
        let session = auth::authenticate(directory, credentials)?;
        self.storage.set(&self.config.storage_key, &session.to_json().map_err(StorageError::from)?)?;

        let landing = session.role().map(Role::landing_page).unwrap_or(Page::Index);
        tracing::debug!("Session opened for user id {}, landing on {}", session.id, landing);
        self.navigator.redirect(&Location::new(landing));
        Ok(session)
    }

    /// Hashes a password for a new or updated account, with the configured cost.
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        auth::hash_password(password, self.config.bcrypt_cost)
    }

    fn admit(&self, allowed: &[String]) -> Result<Session, Denial> {
        let Some(session) = self.current_user() else {
            tracing::debug!("No session, redirecting to login");
            self.navigator.redirect(&Location::new(Page::Login));
            return Err(Denial::NoSession);
        };

        if !allowed.is_empty() {
            let role = session.normalized_role();
            let admitted = !role.is_empty() && allowed.iter().any(|r| *r == role);
            if !admitted {
                tracing::warn!("User id {} with role {:?} not in {:?}", session.id, role, allowed);
                if let Err(e) = self.clear_session() {
                    tracing::error!("Could not clear rejected session: {}", e);
                }
                self.navigator.redirect(&Location::new(Page::Login));
                return Err(Denial::RoleNotPermitted { role: session.role_label().to_string() });
            }
        }
        Ok(session)
    }

    fn clear_session(&self) -> Result<(), StorageError> {
        self.storage.remove(&self.config.storage_key)
    }
}
