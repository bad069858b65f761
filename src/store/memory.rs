use std::sync::Mutex;

use async_trait::async_trait;

use super::{OverviewStore, StoreError};
use crate::models::Overview;

/// Vec-backed store for handler tests. Mirrors the table's unique symbol
/// constraint and sequential ids.
#[derive(Default)]
pub struct MemoryOverviewStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: Vec<Overview>,
}

impl MemoryOverviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn filter<F>(&self, pred: F) -> Vec<Overview>
    where
        F: Fn(&Overview) -> bool,
    {
        let inner = self.inner.lock().unwrap();
        inner.rows.iter().filter(|o| pred(o)).cloned().collect()
    }
}

fn field_eq(field: &Option<String>, value: &str) -> bool {
    field.as_deref() == Some(value)
}

#[async_trait]
impl OverviewStore for MemoryOverviewStore {
    async fn create(&self, mut overview: Overview) -> Result<Overview, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(symbol) = overview.symbol.as_deref() {
            if inner.rows.iter().any(|o| field_eq(&o.symbol, symbol)) {
                return Err(StoreError::Duplicate(symbol.to_string()));
            }
        }
        inner.next_id += 1;
        overview.id = Some(inner.next_id);
        inner.rows.push(overview.clone());
        Ok(overview)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Overview>, StoreError> {
        Ok(self.filter(|o| o.id == Some(id)).into_iter().next())
    }

    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<Overview>, StoreError> {
        Ok(self.filter(|o| field_eq(&o.symbol, symbol)).into_iter().next())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Overview>, StoreError> {
        Ok(self.filter(|o| field_eq(&o.name, name)).into_iter().next())
    }

    async fn find_by_exchange(&self, exchange: &str) -> Result<Vec<Overview>, StoreError> {
        Ok(self.filter(|o| field_eq(&o.exchange, exchange)))
    }

    async fn find_by_sector(&self, sector: &str) -> Result<Vec<Overview>, StoreError> {
        Ok(self.filter(|o| field_eq(&o.sector, sector)))
    }

    async fn find_by_country(&self, country: &str) -> Result<Vec<Overview>, StoreError> {
        Ok(self.filter(|o| field_eq(&o.country, country)))
    }

    async fn find_by_currency(&self, currency: &str) -> Result<Vec<Overview>, StoreError> {
        Ok(self.filter(|o| field_eq(&o.currency, currency)))
    }

    async fn find_all(&self) -> Result<Vec<Overview>, StoreError> {
        Ok(self.filter(|_| true))
    }

    async fn delete_by_id(&self, id: i64) -> Result<Option<Overview>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let pos = inner.rows.iter().position(|o| o.id == Some(id));
        Ok(pos.map(|i| inner.rows.remove(i)))
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let removed = inner.rows.len() as u64;
        inner.rows.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.inner.lock().unwrap().rows.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overview(symbol: &str, exchange: &str) -> Overview {
        Overview {
            symbol: Some(symbol.into()),
            exchange: Some(exchange.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = MemoryOverviewStore::new();
        let a = store.create(overview("IBM", "NYSE")).await.unwrap();
        let b = store.create(overview("MSFT", "NASDAQ")).await.unwrap();
        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_symbol_rejected() {
        let store = MemoryOverviewStore::new();
        store.create(overview("IBM", "NYSE")).await.unwrap();
        let err = store.create(overview("IBM", "NYSE")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(s) if s == "IBM"));
    }

    #[tokio::test]
    async fn test_delete_by_id_returns_removed_row() {
        let store = MemoryOverviewStore::new();
        let saved = store.create(overview("IBM", "NYSE")).await.unwrap();
        let removed = store.delete_by_id(saved.id.unwrap()).await.unwrap();
        assert_eq!(removed, Some(saved));
        assert!(store.delete_by_id(1).await.unwrap().is_none());
    }
}
