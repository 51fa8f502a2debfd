//! Domain-level constants.
//!
//! Collection names, default field values and the fixed messages the
//! gateways answer with.

// =============================================================================
// Collections
// =============================================================================

/// Auth collection holding regular user records
pub const USERS_COLLECTION: &str = "users";

/// Auth collection holding backend superusers (admin gateway credentials)
pub const SUPERUSERS_COLLECTION: &str = "_superusers";

// =============================================================================
// User Defaults
// =============================================================================

/// Role assigned to self-registered users
pub const DEFAULT_ROLE: &str = "read-write";

// =============================================================================
// Authentication
// =============================================================================

/// Authorization scheme carrying the session token, matched case-insensitively
pub const BEARER_SCHEME: &str = "Bearer";

// =============================================================================
// Response Messages
// =============================================================================

pub const MSG_LOGGED_OUT: &str = "Logged out";
pub const MSG_UPDATED: &str = "Updated successfully";
pub const MSG_USER_DELETED: &str = "User deleted";
pub const MSG_RESET_SENT: &str = "Reset link sent";
pub const MSG_ADMIN_USER_DELETED: &str = "User deleted successfully";
