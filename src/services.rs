pub mod auth;
pub use auth::AuthService;
pub mod product_service;
pub use product_service::ProductService;
pub mod ledger_service;
pub use ledger_service::LedgerService;
pub mod order_service;
pub use order_service::OrderService;
pub mod bookkeeping_service;
pub use bookkeeping_service::BookkeepingService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
