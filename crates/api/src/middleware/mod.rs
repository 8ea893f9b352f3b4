//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a JWT Bearer token.
//! - [`rbac::RequireClient`] -- Requires the `client` role.
//! - [`rbac::RequireInstructor`] -- Requires the `instructor` role.
//! - [`rbac::RequireAuth`] -- Requires any known role.

pub mod auth;
pub mod rbac;
