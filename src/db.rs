pub mod user_repo;
pub use user_repo::UserRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod ledger_repo;
pub use ledger_repo::LedgerRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod activity_repo;
pub use activity_repo::ActivityRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod bookkeeping_repo;
pub use bookkeeping_repo::BookkeepingRepository;
