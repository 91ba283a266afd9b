// handlers/auth/mod.rs - Handlers behind the bearer middleware

pub mod whoami; // GET /whoami

pub use whoami::whoami_get;
