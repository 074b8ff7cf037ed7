//! Data models shared by the API clients, services and commands

pub mod instrument;
pub mod quote;
pub mod summary;
