// src/models/dashboard.rs

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// Janela de tempo aceita pelos filtros `?period=` da API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Today,
    Week,
    Month,
    Year,
    All,
}

impl Period {
    // Interpreta o parâmetro da query; ausente ou desconhecido vira All.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("today") => Period::Today,
            Some("week") => Period::Week,
            Some("month") => Period::Month,
            Some("year") => Period::Year,
            _ => Period::All,
        }
    }

    // Data inicial (inclusiva) da janela; None significa sem filtro.
    pub fn start_from(self, today: NaiveDate) -> Option<NaiveDate> {
        let days = match self {
            Period::Today => 0,
            Period::Week => 7,
            Period::Month => 30,
            Period::Year => 365,
            Period::All => return None,
        };
        today.checked_sub_days(Days::new(days))
    }
}

// Somatórios brutos usados pelo confronto global de consistência.
// Sempre calculados sobre o histórico inteiro, nunca filtrados por período.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ConsistencyTotals {
    pub total_stock: i64,
    pub total_initial: i64,
    pub total_incoming: i64,
    pub total_outgoing: i64,
}

// Resultado do confronto: saldo somado vs. saldo derivado do histórico.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockConsistency {
    pub total_stock: i64,
    pub calculated_stock: i64,
    pub difference: i64,
    pub is_consistent: bool,
}

// Um produto cujo saldo gravado divergiu do saldo derivado.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDrift {
    pub code: String,
    pub name: String,
    pub current_stock: i32,
    pub calculated_stock: i64,
    pub difference: i64,
}

// Checagem global mais a lista de produtos divergentes.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockConsistencyReport {
    pub global: StockConsistency,
    pub products: Vec<ProductDrift>,
}

// Os números do dashboard. Os agregados de movimento respeitam o
// período pedido; `stock_consistency` é sempre o confronto integral.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: i64,
    pub total_stock: i64,
    pub incoming_entries: i64,
    pub incoming_quantity: i64,
    pub outgoing_entries: i64,
    pub outgoing_quantity: i64,
    pub revenue: Decimal,
    pub profit: Decimal,
    pub stock_consistency: StockConsistency,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_param_maps_known_values() {
        assert_eq!(Period::from_param(Some("today")), Period::Today);
        assert_eq!(Period::from_param(Some("week")), Period::Week);
        assert_eq!(Period::from_param(Some("month")), Period::Month);
        assert_eq!(Period::from_param(Some("year")), Period::Year);
    }

    #[test]
    fn from_param_defaults_to_all() {
        assert_eq!(Period::from_param(None), Period::All);
        assert_eq!(Period::from_param(Some("fortnight")), Period::All);
    }

    #[test]
    fn start_from_windows() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(Period::Today.start_from(today), Some(today));
        assert_eq!(
            Period::Week.start_from(today),
            NaiveDate::from_ymd_opt(2024, 3, 8)
        );
        assert_eq!(Period::All.start_from(today), None);
    }
}
