// src/models/mod.rs

pub mod question;
pub mod report;
pub mod user;
pub mod user_answer;
