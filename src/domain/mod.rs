pub mod interface;
pub mod model;
pub mod service;
