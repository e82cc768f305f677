#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(deprecated)]

//!
//! MiVet access gate: session handling and role-based access control for the
//! clinic's administrative front end.
//!
//! Every page opens through [`access::Gate`]. The gate reads the persisted
//! [`session::Session`], checks it against the page's allowed roles and the
//! capability table in [`rights`], and redirects (exactly once) when the check fails.
//! Protected pages implement [`access::ProtectedView`] and can only be built by the
//! gate, so a page cannot forget the check.

// Roles and the page catalogue.
pub mod types;

// Capability table.
pub mod rights;

// The persisted session record.
pub mod session;

// Client-side storage for the session.
pub mod storage;

// Gate settings.
pub mod config;

// Locations and redirects.
pub mod navigation;

// Page model for the role UI.
pub mod markup;

// Credential checks and password hashing.
pub mod auth;

// Seam to the hosted data service.
pub mod backend;

// CRUD records and their required-field checks.
pub mod entities;

// Error types.
pub mod error;

// The gate itself.
pub mod access;

#[cfg(feature = "tracing-subscriber")]
pub mod telemetry;

pub use access::{Denial, Gate, PageContext, ProtectedView};
pub use session::Session;
pub use types::{Page, Role};
