//! Domain layer - user record model and request rules.
//!
//! The backend owns every user record. This crate only describes the
//! shapes the gateways relay and the few checks they make before
//! forwarding a request.

pub mod constants;
pub mod error;
pub mod filter;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use filter::RecordFilter;
pub use user::{AuthSession, NewUser, UserRecord};
