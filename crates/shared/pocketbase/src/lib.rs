//! Async client for the PocketBase REST API.
//!
//! Covers the record CRUD and auth-collection endpoints the gateways
//! proxy to. The client is stateless: tokens are passed per call instead
//! of being kept in a shared auth store.

pub mod client;
pub mod error;
pub mod records;

pub use client::{HealthStatus, PocketBase};
pub use error::{ClientError, ClientResult};
pub use records::{ListOptions, ListResult, RecordService};
