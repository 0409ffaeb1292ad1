mod like_service;
mod page_service;
mod tweet_service;

pub use like_service::*;
pub use page_service::*;
pub use tweet_service::*;
