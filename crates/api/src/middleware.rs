//! API middleware.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use draftsmith_core::{AuthService, ProjectService, SectionService};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub project_service: ProjectService,
    pub section_service: SectionService,
}

/// Authentication middleware.
///
/// Resolves a bearer token to its user and stashes the user in request
/// extensions. Requests without a valid token pass through untouched;
/// handlers that need a user reject them via the extractor.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(user) = state.auth_service.resolve_token(token).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
