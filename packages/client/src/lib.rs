pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod receipt;
pub mod session;
pub mod team;

pub use error::{ClientError, Result};
