//! Studio booking domain.
//!
//! Pure types and rules shared by the database engine and the HTTP layer.
//! This crate performs no I/O.

pub mod availability;
pub mod booking;
pub mod error;
pub mod policy;
pub mod profile;
pub mod roles;
pub mod slots;
pub mod subscription;
pub mod types;
