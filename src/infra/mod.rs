mod connection_pool;
mod db_executor;
pub mod migration;

pub use connection_pool::*;
pub use db_executor::*;
