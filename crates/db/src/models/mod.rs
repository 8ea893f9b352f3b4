//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus read-model projections where handlers need joins.

pub mod booking;
pub mod class_session;
pub mod class_type;
pub mod client;
pub mod instructor;
pub mod plan;
pub mod status;
pub mod subscription;
