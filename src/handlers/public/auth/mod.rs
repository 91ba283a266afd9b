// handlers/public/auth/mod.rs - Public authentication handlers
//
// Token acquisition endpoints that do not require authentication.

pub mod login; // POST /login - verify credentials and issue a bearer token
pub mod signup; // POST /signup - create a new account

pub use login::login_post;
pub use signup::signup_post;
