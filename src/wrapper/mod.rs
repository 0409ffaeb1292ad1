#[macro_use]
pub mod macros;
pub mod error;
pub mod response;
