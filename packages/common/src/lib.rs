pub mod constants;
pub mod event;
pub mod fee;
pub mod participant;
pub mod registration;
pub mod signup;
pub mod team;
