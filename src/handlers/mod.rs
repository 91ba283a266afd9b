// handlers/mod.rs - Route handlers grouped by access level
//
// public: no token (/signup, /login)
// auth:   bearer token required (/whoami)
// blogs:  public reads, token-guarded writes (/blogs)

pub mod auth;
pub mod blogs;
pub mod public;
