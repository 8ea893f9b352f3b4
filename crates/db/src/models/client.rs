use serde::Serialize;
use sqlx::FromRow;
use studio_core::types::{DbId, Timestamp};

/// A row from the `clients` table. Authentication data lives with the
/// identity provider; only contact details are kept here.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
