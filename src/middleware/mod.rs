pub mod auth;
pub mod extract;
pub mod response;

pub use auth::{require_auth, require_auth_for_writes, AuthUser};
pub use extract::{JsonBody, PathParam};
pub use response::{ApiResponse, ApiResult};
