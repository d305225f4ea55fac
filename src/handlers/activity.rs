// src/handlers/activity.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::{error::AppError, pagination},
    config::AppState,
    middleware::rbac::{ManagerRole, RequireRole},
    models::activity::ActivityLog,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ActivityListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

// GET /api/activity-logs
#[utoipa::path(
    get,
    path = "/api/activity-logs",
    tag = "Activity",
    params(ActivityListQuery),
    responses(
        (status = 200, description = "Trilha de auditoria, mais recente primeiro", body = Vec<ActivityLog>),
        (status = 403, description = "Requer papel de gerente")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_activity(
    State(app_state): State<AppState>,
    _guard: RequireRole<ManagerRole>,
    Query(query): Query<ActivityListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (limit, offset) = pagination::clamp(query.page, query.limit);

    let logs = app_state.activity_repo.list(limit, offset).await?;

    Ok((StatusCode::OK, Json(logs)))
}
