//! SeaORM entities for the identity tables.

pub mod address;
pub mod credential;
pub mod user;
pub mod verification_token;
