// src/handlers/goods.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::{error::AppError, pagination},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        dashboard::Period,
        goods::{IncomingGood, OutgoingGood},
    },
};

// ---
// Validação Customizada
// ---
fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: entrada de mercadoria
// ---
#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncomingPayload {
    #[validate(length(min = 1, message = "O código do produto é obrigatório."))]
    pub product_code: String,

    #[validate(length(min = 1, message = "O nome do produto é obrigatório."))]
    pub product_name: String,

    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    pub category: String,

    #[validate(length(min = 1, message = "A marca é obrigatória."))]
    pub brand: String,

    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantity: i32,

    pub date: NaiveDate, // Formato YYYY-MM-DD

    pub resi_number: Option<String>,
    pub platform: Option<String>,
}

// ---
// Payload: saída de mercadoria (mesmo formato, mais os valores de margem)
// ---
#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingPayload {
    #[validate(length(min = 1, message = "O código do produto é obrigatório."))]
    pub product_code: String,

    #[validate(length(min = 1, message = "O nome do produto é obrigatório."))]
    pub product_name: String,

    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    pub category: String,

    #[validate(length(min = 1, message = "A marca é obrigatória."))]
    pub brand: String,

    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantity: i32,

    pub date: NaiveDate,

    pub resi_number: Option<String>,
    pub platform: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub purchase_price: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    pub selling_price: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)] // Se o JSON não tiver esse campo, assume 0
    pub discount: Decimal,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct GoodsListQuery {
    pub search: Option<String>,
    pub period: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

// ---
// Entradas
// ---

// POST /api/incoming-goods
#[utoipa::path(
    post,
    path = "/api/incoming-goods",
    tag = "Goods",
    request_body = IncomingPayload,
    responses(
        (status = 201, description = "Entrada lançada; saldo do produto creditado", body = IncomingGood)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_incoming(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<IncomingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let entry = app_state
        .ledger_service
        .create_incoming(
            user.0.id,
            &payload.product_code,
            &payload.product_name,
            &payload.category,
            &payload.brand,
            payload.quantity,
            payload.date,
            payload.resi_number.as_deref(),
            payload.platform.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

// GET /api/incoming-goods
#[utoipa::path(
    get,
    path = "/api/incoming-goods",
    tag = "Goods",
    params(GoodsListQuery),
    responses(
        (status = 200, description = "Lista paginada de entradas", body = Vec<IncomingGood>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_incoming(
    State(app_state): State<AppState>,
    Query(query): Query<GoodsListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (limit, offset) = pagination::clamp(query.page, query.limit);
    let period = Period::from_param(query.period.as_deref());

    let entries = app_state
        .ledger_service
        .list_incoming(query.search.as_deref().unwrap_or(""), period, limit, offset)
        .await?;

    Ok((StatusCode::OK, Json(entries)))
}

// PUT /api/incoming-goods/{id}
#[utoipa::path(
    put,
    path = "/api/incoming-goods/{id}",
    tag = "Goods",
    params(("id" = Uuid, Path, description = "ID do lançamento")),
    request_body = IncomingPayload,
    responses(
        (status = 200, description = "Entrada atualizada; saldo compensado", body = IncomingGood),
        (status = 404, description = "Lançamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_incoming(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<IncomingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let entry = app_state
        .ledger_service
        .update_incoming(
            user.0.id,
            id,
            &payload.product_code,
            &payload.product_name,
            &payload.category,
            &payload.brand,
            payload.quantity,
            payload.date,
            payload.resi_number.as_deref(),
            payload.platform.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(entry)))
}

// DELETE /api/incoming-goods/{id}
#[utoipa::path(
    delete,
    path = "/api/incoming-goods/{id}",
    tag = "Goods",
    params(("id" = Uuid, Path, description = "ID do lançamento")),
    responses(
        (status = 204, description = "Entrada removida; saldo debitado de volta"),
        (status = 404, description = "Lançamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_incoming(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.ledger_service.delete_incoming(user.0.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Saídas
// ---

// POST /api/outgoing-goods
#[utoipa::path(
    post,
    path = "/api/outgoing-goods",
    tag = "Goods",
    request_body = OutgoingPayload,
    responses(
        (status = 201, description = "Saída lançada; saldo do produto debitado", body = OutgoingGood),
        (status = 400, description = "Estoque insuficiente ou produto desconhecido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_outgoing(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<OutgoingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let entry = app_state
        .ledger_service
        .create_outgoing(
            user.0.id,
            &payload.product_code,
            &payload.product_name,
            &payload.category,
            &payload.brand,
            payload.quantity,
            payload.date,
            payload.resi_number.as_deref(),
            payload.platform.as_deref(),
            payload.purchase_price,
            payload.selling_price,
            payload.discount,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

// GET /api/outgoing-goods
#[utoipa::path(
    get,
    path = "/api/outgoing-goods",
    tag = "Goods",
    params(GoodsListQuery),
    responses(
        (status = 200, description = "Lista paginada de saídas", body = Vec<OutgoingGood>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_outgoing(
    State(app_state): State<AppState>,
    Query(query): Query<GoodsListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (limit, offset) = pagination::clamp(query.page, query.limit);
    let period = Period::from_param(query.period.as_deref());

    let entries = app_state
        .ledger_service
        .list_outgoing(query.search.as_deref().unwrap_or(""), period, limit, offset)
        .await?;

    Ok((StatusCode::OK, Json(entries)))
}

// PUT /api/outgoing-goods/{id}
#[utoipa::path(
    put,
    path = "/api/outgoing-goods/{id}",
    tag = "Goods",
    params(("id" = Uuid, Path, description = "ID do lançamento")),
    request_body = OutgoingPayload,
    responses(
        (status = 200, description = "Saída atualizada; saldo compensado", body = OutgoingGood),
        (status = 400, description = "Disponibilidade combinada insuficiente"),
        (status = 404, description = "Lançamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_outgoing(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<OutgoingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let entry = app_state
        .ledger_service
        .update_outgoing(
            user.0.id,
            id,
            &payload.product_code,
            &payload.product_name,
            &payload.category,
            &payload.brand,
            payload.quantity,
            payload.date,
            payload.resi_number.as_deref(),
            payload.platform.as_deref(),
            payload.purchase_price,
            payload.selling_price,
            payload.discount,
        )
        .await?;

    Ok((StatusCode::OK, Json(entry)))
}

// DELETE /api/outgoing-goods/{id}
#[utoipa::path(
    delete,
    path = "/api/outgoing-goods/{id}",
    tag = "Goods",
    params(("id" = Uuid, Path, description = "ID do lançamento")),
    responses(
        (status = 204, description = "Saída removida; saldo creditado de volta"),
        (status = 404, description = "Lançamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_outgoing(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.ledger_service.delete_outgoing(user.0.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
