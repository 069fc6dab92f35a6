pub mod liked_quote;
pub mod quote;
pub mod user;
