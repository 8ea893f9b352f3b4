//! Profile edits for clients and instructors.
//!
//! Every field is optional; `None` leaves the stored value untouched.

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ClientProfileUpdate {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 3, max = 32))]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct InstructorProfileUpdate {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(length(min = 3, max = 32))]
    pub phone: Option<String>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    #[validate(length(max = 20))]
    pub specializations: Option<Vec<String>>,
}
