//! Authentication primitives.
//!
//! Identity is managed by an external provider. This service validates the
//! HS256 access tokens it issues and can mint its own for tooling; see [`jwt`].

pub mod jwt;
