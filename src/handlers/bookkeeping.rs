// src/handlers/bookkeeping.rs

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
    models::{
        bookkeeping::{BookkeepingSummary, MonthlyBookkeepingEntry},
        dashboard::Period,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct PeriodQuery {
    // today | week | month | year; ausente = tudo
    pub period: Option<String>,
}

// GET /api/bookkeeping/summary
#[utoipa::path(
    get,
    path = "/api/bookkeeping/summary",
    tag = "Bookkeeping",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Receita, custo e lucro das saídas na janela", body = BookkeepingSummary)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, AppError> {
    let period = Period::from_param(query.period.as_deref());

    let summary = app_state.bookkeeping_service.summary(period).await?;

    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/bookkeeping/monthly
#[utoipa::path(
    get,
    path = "/api/bookkeeping/monthly",
    tag = "Bookkeeping",
    responses(
        (status = 200, description = "Fechamento dos últimos 12 meses com movimento", body = Vec<MonthlyBookkeepingEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_monthly(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.bookkeeping_service.monthly().await?;

    Ok((StatusCode::OK, Json(entries)))
}
