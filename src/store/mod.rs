use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::db;
use crate::models::Overview;

#[cfg(test)]
pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate symbol: {0}")]
    Duplicate(String),

    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Persistence for overview records. Symbol uniqueness is the store's job.
#[async_trait]
pub trait OverviewStore: Send + Sync {
    async fn create(&self, overview: Overview) -> Result<Overview, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Overview>, StoreError>;

    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<Overview>, StoreError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Overview>, StoreError>;

    async fn find_by_exchange(&self, exchange: &str) -> Result<Vec<Overview>, StoreError>;

    async fn find_by_sector(&self, sector: &str) -> Result<Vec<Overview>, StoreError>;

    async fn find_by_country(&self, country: &str) -> Result<Vec<Overview>, StoreError>;

    async fn find_by_currency(&self, currency: &str) -> Result<Vec<Overview>, StoreError>;

    async fn find_all(&self) -> Result<Vec<Overview>, StoreError>;

    /// Removes the record and hands it back, or `None` if the id is unknown.
    async fn delete_by_id(&self, id: i64) -> Result<Option<Overview>, StoreError>;

    async fn delete_all(&self) -> Result<u64, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;
}

#[derive(Clone)]
pub struct PgOverviewStore {
    pool: PgPool,
}

impl PgOverviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OverviewStore for PgOverviewStore {
    async fn create(&self, overview: Overview) -> Result<Overview, StoreError> {
        let symbol = overview.symbol.clone().unwrap_or_default();
        db::overview_queries::insert(&self.pool, overview)
            .await
            .map_err(|e| {
                let duplicate = matches!(
                    &e,
                    sqlx::Error::Database(db_err) if db_err.is_unique_violation()
                );
                if duplicate {
                    StoreError::Duplicate(symbol)
                } else {
                    StoreError::Db(e)
                }
            })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Overview>, StoreError> {
        Ok(db::overview_queries::fetch_one(&self.pool, id).await?)
    }

    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<Overview>, StoreError> {
        Ok(db::overview_queries::fetch_by_symbol(&self.pool, symbol).await?)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Overview>, StoreError> {
        Ok(db::overview_queries::fetch_by_name(&self.pool, name).await?)
    }

    async fn find_by_exchange(&self, exchange: &str) -> Result<Vec<Overview>, StoreError> {
        Ok(db::overview_queries::fetch_by_exchange(&self.pool, exchange).await?)
    }

    async fn find_by_sector(&self, sector: &str) -> Result<Vec<Overview>, StoreError> {
        Ok(db::overview_queries::fetch_by_sector(&self.pool, sector).await?)
    }

    async fn find_by_country(&self, country: &str) -> Result<Vec<Overview>, StoreError> {
        Ok(db::overview_queries::fetch_by_country(&self.pool, country).await?)
    }

    async fn find_by_currency(&self, currency: &str) -> Result<Vec<Overview>, StoreError> {
        Ok(db::overview_queries::fetch_by_currency(&self.pool, currency).await?)
    }

    async fn find_all(&self) -> Result<Vec<Overview>, StoreError> {
        Ok(db::overview_queries::fetch_all(&self.pool).await?)
    }

    async fn delete_by_id(&self, id: i64) -> Result<Option<Overview>, StoreError> {
        Ok(db::overview_queries::delete(&self.pool, id).await?)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        Ok(db::overview_queries::delete_all(&self.pool).await?)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(db::overview_queries::count(&self.pool).await?)
    }
}
