//! Authentication endpoints.

use axum::{Form, Json, Router, extract::State, routing::get, routing::post};
use draftsmith_common::AppResult;
use draftsmith_core::{LoginInput, RegisterInput};
use draftsmith_db::entities::user;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState};

/// Registration request.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

/// Create a new user account.
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<user::Model>> {
    let user = state
        .auth_service
        .register(RegisterInput {
            email: req.email,
            password: req.password,
            full_name: req.full_name,
        })
        .await?;

    Ok(Json(user))
}

/// Login form body. The username field carries the email address,
/// matching the password-grant form convention.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Token response.
#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Exchange credentials for a bearer token.
async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> AppResult<Json<TokenResponse>> {
    let (_user, token) = state
        .auth_service
        .login(LoginInput {
            email: form.username,
            password: form.password,
        })
        .await?;

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer",
    }))
}

/// Return the calling user.
async fn me(AuthUser(user): AuthUser) -> Json<user::Model> {
    Json(user)
}

/// Create the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_serialization() {
        let response = TokenResponse {
            access_token: "abc.def.ghi".to_string(),
            token_type: "bearer",
        };

        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["access_token"], "abc.def.ghi");
        assert_eq!(json["token_type"], "bearer");
    }

    #[test]
    fn test_login_form_decodes_urlencoded_body() {
        let form: LoginForm =
            serde_urlencoded::from_str("username=a%40example.com&password=hunter22").unwrap();

        assert_eq!(form.username, "a@example.com");
        assert_eq!(form.password, "hunter22");
    }
}
