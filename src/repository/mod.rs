mod like_repo;
mod repository_error;
mod tweet_repo;
mod user_repo;

pub use like_repo::*;
pub use repository_error::*;
pub use tweet_repo::*;
pub use user_repo::*;
