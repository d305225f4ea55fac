// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Products ---
        handlers::products::create_product,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::delete_product,

        // --- Goods (razão de estoque) ---
        handlers::goods::create_incoming,
        handlers::goods::list_incoming,
        handlers::goods::update_incoming,
        handlers::goods::delete_incoming,
        handlers::goods::create_outgoing,
        handlers::goods::list_outgoing,
        handlers::goods::update_outgoing,
        handlers::goods::delete_outgoing,

        // --- Orders ---
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::update_order,
        handlers::orders::delete_order,
        handlers::orders::bulk_convert_orders,

        // --- Bookkeeping ---
        handlers::bookkeeping::get_summary,
        handlers::bookkeeping::get_monthly,

        // --- Dashboard ---
        handlers::dashboard::get_stats,

        // --- Utils ---
        handlers::utils::recalculate_stock,
        handlers::utils::stock_consistency,

        // --- Activity ---
        handlers::activity::list_activity,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Products ---
            models::product::Product,

            // --- Goods ---
            models::goods::IncomingGood,
            models::goods::OutgoingGood,

            // --- Orders ---
            models::order::OrderStatus,
            models::order::Order,
            models::order::BulkConvertResult,

            // --- Dashboard / Reconciliação ---
            models::dashboard::StockConsistency,
            models::dashboard::ProductDrift,
            models::dashboard::StockConsistencyReport,
            models::dashboard::DashboardStats,

            // --- Bookkeeping ---
            models::bookkeeping::BookkeepingSummary,
            models::bookkeeping::MonthlyBookkeepingEntry,

            // --- Activity ---
            models::activity::ActivityLog,

            // --- Payloads ---
            handlers::products::ProductPayload,
            handlers::goods::IncomingPayload,
            handlers::goods::OutgoingPayload,
            handlers::orders::OrderPayload,
            handlers::orders::BulkConvertPayload,
            handlers::utils::RecalculateResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário"),
        (name = "Products", description = "Catálogo de Produtos"),
        (name = "Goods", description = "Entradas e Saídas (razão de estoque)"),
        (name = "Orders", description = "Pedidos de Compra"),
        (name = "Bookkeeping", description = "Contabilidade das Saídas"),
        (name = "Dashboard", description = "Indicadores Gerenciais"),
        (name = "Utils", description = "Reconciliação e Reparo de Estoque"),
        (name = "Activity", description = "Trilha de Auditoria")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
