//! Middleware for session validation.

mod session;

pub use session::{session_middleware, CurrentSession};
