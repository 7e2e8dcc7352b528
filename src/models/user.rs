// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'trivia_user' table in the database.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first: String,
    pub last: String,
    pub email: String,
}

impl User {
    /// "first last", as shown in reports and greetings.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first, self.last)
    }
}

/// DTO for creating or replacing a user.
#[derive(Debug, Deserialize, Validate)]
pub struct UserRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "First name must be between 1 and 100 characters."
    ))]
    pub first: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Last name must be between 1 and 100 characters."
    ))]
    pub last: String,
    #[validate(email(message = "Email must be a valid address."), length(max = 100))]
    pub email: String,
}
