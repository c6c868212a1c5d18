// handlers/protected/mod.rs - Handlers behind `require_auth`
//
// Every route here is mounted with the auth route layer; handlers can rely
// on an `AuthUser` extension being present.

pub mod auth;
pub mod catalog;
pub mod wines;
