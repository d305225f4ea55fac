// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        ActivityRepository, BookkeepingRepository, DashboardRepository, LedgerRepository,
        OrderRepository, ProductRepository, UserRepository,
    },
    services::{
        AuthService, BookkeepingService, DashboardService, LedgerService, OrderService,
        ProductService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub auth_service: AuthService,
    pub product_service: ProductService,
    pub ledger_service: LedgerService,
    pub order_service: OrderService,
    pub bookkeeping_service: BookkeepingService,
    pub dashboard_service: DashboardService,
    pub activity_repo: ActivityRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let ledger_repo = LedgerRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new(db_pool.clone());
        let activity_repo = ActivityRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());
        let bookkeeping_repo = BookkeepingRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret.clone(), db_pool.clone());
        let product_service =
            ProductService::new(product_repo.clone(), activity_repo.clone(), db_pool.clone());
        let ledger_service =
            LedgerService::new(ledger_repo.clone(), activity_repo.clone(), db_pool.clone());
        let order_service = OrderService::new(
            order_repo,
            product_repo,
            activity_repo.clone(),
            db_pool.clone(),
        );
        let bookkeeping_service = BookkeepingService::new(bookkeeping_repo);
        let dashboard_service = DashboardService::new(dashboard_repo, ledger_repo);

        Ok(Self {
            db_pool,
            jwt_secret,
            auth_service,
            product_service,
            ledger_service,
            order_service,
            bookkeeping_service,
            dashboard_service,
            activity_repo,
        })
    }
}
