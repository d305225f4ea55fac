// src/handlers/utils.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{ManagerRole, RequireRole},
    },
    models::dashboard::StockConsistencyReport,
};

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecalculateResponse {
    pub products_updated: u64,
}

// POST /api/utils/recalculate-stock
#[utoipa::path(
    post,
    path = "/api/utils/recalculate-stock",
    tag = "Utils",
    responses(
        (status = 200, description = "Saldos recalculados a partir do histórico", body = RecalculateResponse),
        (status = 403, description = "Requer papel de gerente")
    ),
    security(("api_jwt" = []))
)]
pub async fn recalculate_stock(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<ManagerRole>,
) -> Result<impl IntoResponse, AppError> {
    let products_updated = app_state.ledger_service.recompute_all(user.0.id).await?;

    Ok((StatusCode::OK, Json(RecalculateResponse { products_updated })))
}

// GET /api/utils/stock-consistency
#[utoipa::path(
    get,
    path = "/api/utils/stock-consistency",
    tag = "Utils",
    responses(
        (status = 200, description = "Confronto global + produtos divergentes", body = StockConsistencyReport),
        (status = 403, description = "Requer papel de gerente")
    ),
    security(("api_jwt" = []))
)]
pub async fn stock_consistency(
    State(app_state): State<AppState>,
    _guard: RequireRole<ManagerRole>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state.ledger_service.consistency_report().await?;

    Ok((StatusCode::OK, Json(report)))
}
