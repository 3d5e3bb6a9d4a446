use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::User;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::errors::AuthError;

/// Extension type carrying the resolved caller
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Middleware that resolves the bearer token to a user and adds it to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let user = state
        .auth_service
        .resolve_caller(token)
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let unauthorized = || {
        tracing::debug!("Missing or malformed Authorization header");
        ApiError::from(AuthError::Unauthenticated).into_response()
    };

    let auth_str = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(unauthorized)?
        .to_str()
        .map_err(|_| unauthorized())?;

    match auth_str.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() => {
            Ok(token.trim())
        }
        _ => Err(unauthorized()),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http;

    use super::*;

    fn request_with(value: Option<&str>) -> Request {
        let mut builder = http::Request::builder().uri("/users/me");
        if let Some(value) = value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_extract_bearer_token() {
        let req = request_with(Some("Bearer abc.def.ghi"));
        assert_eq!(extract_token_from_header(&req).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let req = request_with(Some("bearer abc.def.ghi"));
        assert_eq!(extract_token_from_header(&req).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header_rejected() {
        let req = request_with(None);
        assert!(extract_token_from_header(&req).is_err());
    }

    #[test]
    fn test_other_scheme_rejected() {
        let req = request_with(Some("Basic YWxpY2U6c2VjcmV0"));
        assert!(extract_token_from_header(&req).is_err());
    }

    #[test]
    fn test_empty_token_rejected() {
        let req = request_with(Some("Bearer "));
        assert!(extract_token_from_header(&req).is_err());
    }
}
