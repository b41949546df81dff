pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod events;
pub mod receipt;
pub mod team;
