//! HTTP surface: JSON API routes and the page routes' view models.

pub mod handlers;
mod params;
mod router;
mod server;

pub use server::bind;
