//! Middleware modules.

mod admin;

pub use admin::{admin_middleware, CurrentAdmin};
