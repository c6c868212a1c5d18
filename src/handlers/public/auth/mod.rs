// handlers/public/auth/mod.rs - Account endpoints open to anonymous clients

pub mod login;
pub mod register;
pub mod user;

pub use login::login;
pub use register::register;
pub use user::get_user;
