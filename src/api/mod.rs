//! HTTP API surface.

pub mod auth;
pub mod handlers;

pub use handlers::{create_company, list_companies};
