pub mod auth;
pub mod fixture;
pub mod prediction;
pub mod user;
