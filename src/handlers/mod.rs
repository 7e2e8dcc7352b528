// src/handlers/mod.rs

pub mod questions;
pub mod reports;
pub mod user_answers;
pub mod users;
