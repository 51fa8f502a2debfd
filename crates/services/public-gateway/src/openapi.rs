//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::account_handler::{
    AccessResponse, UpdateUserDataRequest, UpdatedUserResponse, UserDataResponse,
};
use crate::handlers::auth_handler::{
    LoginRequest, MessageResponse, PasswordResetRequest, RegisterRequest, TokenResponse,
    VerifiedResponse,
};
use domain::UserRecord;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth_handler::register,
        crate::handlers::auth_handler::login,
        crate::handlers::auth_handler::logout,
        crate::handlers::auth_handler::verify_user,
        crate::handlers::auth_handler::password_reset,
        crate::handlers::account_handler::verify_access,
        crate::handlers::account_handler::get_user_data,
        crate::handlers::account_handler::update_user_data,
        crate::handlers::account_handler::refresh_token,
        crate::handlers::account_handler::unregister,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            PasswordResetRequest,
            TokenResponse,
            MessageResponse,
            VerifiedResponse,
            AccessResponse,
            UpdateUserDataRequest,
            UserDataResponse,
            UpdatedUserResponse,
            UserRecord,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Account", description = "Operations on the caller's own account"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}
