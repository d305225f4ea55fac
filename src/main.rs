//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Json, Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

// Importações principais
use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Tudo que não é auth/health/docs fica atrás do guardião de token.
    // O papel de gerente é exigido rota a rota pelo extractor RequireRole.
    let protected_routes = Router::new()
        .route("/api/users/me", get(handlers::auth::get_me))
        .route(
            "/api/products",
            post(handlers::products::create_product).get(handlers::products::list_products),
        )
        .route(
            "/api/products/{id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route(
            "/api/incoming-goods",
            post(handlers::goods::create_incoming).get(handlers::goods::list_incoming),
        )
        .route(
            "/api/incoming-goods/{id}",
            put(handlers::goods::update_incoming).delete(handlers::goods::delete_incoming),
        )
        .route(
            "/api/outgoing-goods",
            post(handlers::goods::create_outgoing).get(handlers::goods::list_outgoing),
        )
        .route(
            "/api/outgoing-goods/{id}",
            put(handlers::goods::update_outgoing).delete(handlers::goods::delete_outgoing),
        )
        .route(
            "/api/orders",
            post(handlers::orders::create_order).get(handlers::orders::list_orders),
        )
        .route(
            "/api/orders/bulk-convert",
            post(handlers::orders::bulk_convert_orders),
        )
        .route(
            "/api/orders/{id}",
            put(handlers::orders::update_order).delete(handlers::orders::delete_order),
        )
        .route("/api/bookkeeping/summary", get(handlers::bookkeeping::get_summary))
        .route("/api/bookkeeping/monthly", get(handlers::bookkeeping::get_monthly))
        .route("/api/dashboard/stats", get(handlers::dashboard::get_stats))
        .route(
            "/api/utils/recalculate-stock",
            post(handlers::utils::recalculate_stock),
        )
        .route(
            "/api/utils/stock-consistency",
            get(handlers::utils::stock_consistency),
        )
        .route("/api/activity-logs", get(handlers::activity::list_activity))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(docs::ApiDoc::openapi()) }),
        )
        .nest("/api/auth", auth_routes)
        .merge(protected_routes)
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
