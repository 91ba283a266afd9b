pub mod manager;
pub mod models;
pub mod postgres;
pub mod schema;
pub mod store;

pub use manager::{build_pool, DatabaseError};
pub use models::{Blog, BlogInput, NewUser, User};
pub use postgres::PgStore;
pub use schema::init_schema;
pub use store::{BlogStore, UserStore};
