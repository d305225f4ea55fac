// src/services/bookkeeping_service.rs

use chrono::Utc;

use crate::{
    common::error::AppError,
    db::BookkeepingRepository,
    models::{
        bookkeeping::{BookkeepingSummary, MonthlyBookkeepingEntry},
        dashboard::Period,
    },
};

#[derive(Clone)]
pub struct BookkeepingService {
    bookkeeping_repo: BookkeepingRepository,
}

impl BookkeepingService {
    pub fn new(bookkeeping_repo: BookkeepingRepository) -> Self {
        Self { bookkeeping_repo }
    }

    pub async fn summary(&self, period: Period) -> Result<BookkeepingSummary, AppError> {
        let start = period.start_from(Utc::now().date_naive());
        self.bookkeeping_repo.summary(start).await
    }

    pub async fn monthly(&self) -> Result<Vec<MonthlyBookkeepingEntry>, AppError> {
        self.bookkeeping_repo.monthly().await
    }
}
