mod identity;
mod like;
mod page;
mod tweet;
mod user;

pub use identity::*;
pub use like::*;
pub use page::*;
pub use tweet::*;
pub use user::*;
