pub mod post;
pub mod user;

pub use user::UserWithPosts;
