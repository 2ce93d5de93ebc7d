//! `fieldsales-auth` — user profiles and role-based access to the admin console.
//!
//! Authentication itself is delegated to the hosted service; this crate only
//! models the `profiles` row and decides what a role may do.

pub mod authorize;
pub mod permissions;
pub mod profile;
pub mod roles;

pub use authorize::{AuthzError, authorize};
pub use permissions::Permission;
pub use profile::{NewUserProfile, UserProfile, parse_commission};
pub use roles::Role;
