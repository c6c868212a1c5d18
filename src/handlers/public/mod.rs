// handlers/public/mod.rs - Handlers that need no token
//
// Catalog reads, account registration, login and user lookup.

pub mod auth;
pub mod catalog;
