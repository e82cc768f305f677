//! Access control: the gate, role/capability predicates, protected views and
//! role-driven UI.

pub mod gate;
pub mod predicates;
pub mod role_ui;
pub mod view;

pub use gate::{Denial, Gate, RESTRICTED_NOTICE};
pub use predicates::*;
pub use role_ui::{init_role_ui, wire_logout};
pub use view::{PageContext, ProtectedView};
// Also expose the capability table under a shorter path.
pub use crate::rights;
