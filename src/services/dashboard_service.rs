// src/services/dashboard_service.rs

use chrono::Utc;

use crate::{
    common::error::AppError,
    db::{DashboardRepository, LedgerRepository},
    models::dashboard::{DashboardStats, Period},
    services::ledger_service::consistency_from_totals,
};

#[derive(Clone)]
pub struct DashboardService {
    dashboard_repo: DashboardRepository,
    ledger_repo: LedgerRepository,
}

impl DashboardService {
    pub fn new(dashboard_repo: DashboardRepository, ledger_repo: LedgerRepository) -> Self {
        Self {
            dashboard_repo,
            ledger_repo,
        }
    }

    pub async fn get_stats(&self, period: Period) -> Result<DashboardStats, AppError> {
        let start = period.start_from(Utc::now().date_naive());

        let (total_products, total_stock) = self.dashboard_repo.product_totals().await?;
        let (incoming_entries, incoming_quantity) =
            self.dashboard_repo.incoming_totals(start).await?;
        let (outgoing_entries, outgoing_quantity) =
            self.dashboard_repo.outgoing_totals(start).await?;
        let (revenue, cost) = self.dashboard_repo.sales_totals(start).await?;

        // O confronto de consistência é sempre integral, mesmo quando o
        // dashboard está filtrado por período.
        let totals = self.ledger_repo.consistency_totals().await?;

        Ok(DashboardStats {
            total_products,
            total_stock,
            incoming_entries,
            incoming_quantity,
            outgoing_entries,
            outgoing_quantity,
            revenue,
            profit: revenue - cost,
            stock_consistency: consistency_from_totals(&totals),
        })
    }
}
