// handlers/protected/auth/mod.rs - Account endpoints for authenticated users

pub mod session;
pub mod user;

pub use session::logout;
pub use user::delete_user;
