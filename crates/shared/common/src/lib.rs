//! Common utilities shared by both gateways.
//!
//! This crate provides:
//! - Unified error handling and the JSON error body
//! - Bearer token and JSON body extraction
//! - Configuration structures

pub mod config;
pub mod error;
pub mod extract;

pub use config::*;
pub use error::{AppError, AppResult};
pub use extract::{bearer_token, JsonBody};
