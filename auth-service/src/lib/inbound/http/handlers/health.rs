use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::StorageHealth;
use crate::inbound::http::router::AppState;

/// Report whether storage is reachable.
///
/// Any storage failure is a 503 rather than a 500.
pub async fn health(
    State(state): State<AppState>,
) -> Result<ApiSuccess<HealthResponseData>, ApiError> {
    match state.auth_service.check_health().await {
        Ok(health) => Ok(ApiSuccess::new(StatusCode::OK, health.into())),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            Err(ApiError::ServiceUnavailable(
                "Database connection failed".to_string(),
            ))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponseData {
    pub status: String,
    pub database: String,
    pub users_table_exists: bool,
}

impl From<StorageHealth> for HealthResponseData {
    fn from(health: StorageHealth) -> Self {
        Self {
            status: "healthy".to_string(),
            database: "connected".to_string(),
            users_table_exists: health.users_table_exists,
        }
    }
}
