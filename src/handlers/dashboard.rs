// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    models::dashboard::{DashboardStats, Period},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct DashboardQuery {
    // today | week | month | year; ausente = tudo.
    // O confronto de consistência ignora a janela: é sempre integral.
    pub period: Option<String>,
}

// GET /api/dashboard/stats
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Indicadores do período + confronto de consistência do estoque", body = DashboardStats)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_stats(
    State(app_state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let period = Period::from_param(query.period.as_deref());

    let stats = app_state.dashboard_service.get_stats(period).await?;

    Ok((StatusCode::OK, Json(stats)))
}
