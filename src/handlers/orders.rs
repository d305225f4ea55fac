// src/handlers/orders.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::order::{BulkConvertResult, Order},
};

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    #[validate(length(min = 1, message = "O código é obrigatório."))]
    pub code: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    pub category: String,

    #[validate(length(min = 1, message = "A marca é obrigatória."))]
    pub brand: String,

    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantity: i32,

    pub platform: Option<String>,

    pub order_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkConvertPayload {
    #[validate(length(min = 1, message = "Informe ao menos um pedido."))]
    pub order_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct OrderListQuery {
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = OrderPayload,
    responses(
        (status = 201, description = "Pedido criado", body = Order)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<OrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let order = app_state
        .order_service
        .create(
            user.0.id,
            &payload.code,
            &payload.name,
            &payload.category,
            &payload.brand,
            payload.quantity,
            payload.platform.as_deref(),
            payload.order_date,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    params(OrderListQuery),
    responses(
        (status = 200, description = "Lista paginada de pedidos", body = Vec<Order>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (limit, offset) = pagination::clamp(query.page, query.limit);

    let orders = app_state
        .order_service
        .list(query.search.as_deref().unwrap_or(""), limit, offset)
        .await?;

    Ok((StatusCode::OK, Json(orders)))
}

// PUT /api/orders/{id}
#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    request_body = OrderPayload,
    responses(
        (status = 200, description = "Pedido atualizado", body = Order),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_order(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<OrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let order = app_state
        .order_service
        .update(
            user.0.id,
            id,
            &payload.code,
            &payload.name,
            &payload.category,
            &payload.brand,
            payload.quantity,
            payload.platform.as_deref(),
            payload.order_date,
        )
        .await?;

    Ok((StatusCode::OK, Json(order)))
}

// DELETE /api/orders/{id}
#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 204, description = "Pedido removido"),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_order(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.order_service.delete(user.0.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/orders/bulk-convert
#[utoipa::path(
    post,
    path = "/api/orders/bulk-convert",
    tag = "Orders",
    request_body = BulkConvertPayload,
    responses(
        (status = 200, description = "Pedidos pendentes convertidos em produtos", body = BulkConvertResult)
    ),
    security(("api_jwt" = []))
)]
pub async fn bulk_convert_orders(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<BulkConvertPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let result = app_state
        .order_service
        .bulk_convert(user.0.id, &payload.order_ids)
        .await?;

    Ok((StatusCode::OK, Json(result)))
}
