// handlers/blogs/mod.rs - Blog post CRUD
//
// GET /blogs is public. POST, PUT and DELETE run behind the bearer middleware
// unless REQUIRE_AUTH_FOR_WRITES=false.

pub mod blog_delete; // DELETE /blogs/:id
pub mod blog_put; // PUT /blogs/:id
pub mod blogs_get; // GET /blogs
pub mod blogs_post; // POST /blogs

pub use blog_delete::blog_delete;
pub use blog_put::blog_put;
pub use blogs_get::blogs_get;
pub use blogs_post::blogs_post;
