// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (bearer token required on mutating routes)

pub mod protected;
pub mod public;
pub mod system;
