pub mod auth;
pub mod extract;
pub mod response;

pub use auth::{require_auth, AuthUser};
pub use extract::JsonBody;
pub use response::{ApiResponse, ApiResult};
