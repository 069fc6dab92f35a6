pub mod auth;
pub mod quote;
