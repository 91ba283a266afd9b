pub mod blog;
pub mod user;

pub use blog::{Blog, BlogInput};
pub use user::{NewUser, User};
