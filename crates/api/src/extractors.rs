//! Request extractors.

use axum::{extract::FromRequestParts, http::request::Parts};
use draftsmith_common::AppError;
use draftsmith_db::entities::user;

/// Authenticated user extractor.
///
/// Reads the user placed in request extensions by the auth middleware.
/// Rejects with 401 and a bearer challenge when no valid token was sent.
#[derive(Debug, Clone)]
pub struct AuthUser(pub user::Model);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<user::Model>()
            .cloned()
            .map(AuthUser)
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn test_user() -> user::Model {
        user::Model {
            id: 7,
            email: "a@example.com".to_string(),
            full_name: None,
            hashed_password: "x".to_string(),
            created_at: chrono::Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_extraction_without_user_is_unauthorized() {
        let (mut parts, ()) = Request::builder().body(()).unwrap().into_parts();

        let result = AuthUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_extraction_with_user_succeeds() {
        let (mut parts, ()) = Request::builder().body(()).unwrap().into_parts();
        parts.extensions.insert(test_user());

        let AuthUser(user) = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.id, 7);
    }
}
