//! User record and auth session types.
//!
//! The backend owns the user record. The gateways only relay it, so the
//! record is kept as the raw JSON object the backend returned and exposes
//! typed accessors for the handful of fields the gateways look at.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::DEFAULT_ROLE;

/// User record as returned by the backend.
///
/// Serialises back to exactly the object it was built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord(Map<String, Value>);

impl UserRecord {
    /// Record identifier assigned by the backend
    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    /// Email address, absent when the backend hides it
    pub fn email(&self) -> Option<&str> {
        self.str_field("email")
    }

    /// Role field
    pub fn role(&self) -> Option<&str> {
        self.str_field("role")
    }

    /// Whether the backend marked the email as verified
    pub fn is_verified(&self) -> bool {
        self.0
            .get("verified")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Overwrite fields with the given values.
    pub fn merge(&mut self, fields: Map<String, Value>) {
        self.0.extend(fields);
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for UserRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

#[cfg(feature = "openapi")]
impl<'s> utoipa::ToSchema<'s> for UserRecord {
    fn schema() -> (
        &'s str,
        utoipa::openapi::RefOr<utoipa::openapi::schema::Schema>,
    ) {
        use utoipa::openapi::schema::{AdditionalProperties, ObjectBuilder, SchemaType};

        (
            "UserRecord",
            ObjectBuilder::new()
                .description(Some("User record as stored by the backend"))
                .property("id", ObjectBuilder::new().schema_type(SchemaType::String))
                .required("id")
                .property("email", ObjectBuilder::new().schema_type(SchemaType::String))
                .property("verified", ObjectBuilder::new().schema_type(SchemaType::Boolean))
                .property("role", ObjectBuilder::new().schema_type(SchemaType::String))
                .additional_properties(Some(AdditionalProperties::FreeForm(true)))
                .into(),
        )
    }
}

/// Authenticated session issued by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Opaque session token
    pub token: String,
    /// Record the token belongs to
    pub record: UserRecord,
}

impl AuthSession {
    /// Identifier of the authenticated record.
    pub fn record_id(&self) -> Option<&str> {
        self.record.id()
    }
}

/// Registration payload sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub email_visibility: bool,
    pub verified: bool,
    pub role: String,
}

impl NewUser {
    /// Build the draft for a self-registration.
    ///
    /// New users start unverified, with a hidden email and the default role.
    /// A missing confirmation repeats the password.
    pub fn registration(id: String, password: String, password_confirm: Option<String>) -> Self {
        let password_confirm = password_confirm.unwrap_or_else(|| password.clone());
        Self {
            email: id,
            password,
            password_confirm,
            email_visibility: false,
            verified: false,
            role: DEFAULT_ROLE.to_string(),
        }
    }
}
