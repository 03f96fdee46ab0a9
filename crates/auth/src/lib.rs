//! `anvil-auth` — pure authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod actor;
pub mod gate;
pub mod permissions;
pub mod roles;

pub use actor::Actor;
pub use gate::{AuthzError, PermissionGate, PermissionGateConfig};
pub use permissions::Permission;
pub use roles::Role;
