use tracing::info;

use crate::errors::AppError;
use crate::external::overview_provider::OverviewProvider;
use crate::models::{DeleteAllResult, Overview};
use crate::store::OverviewStore;

pub const DEMO_SYMBOL: &str = "IBM";
pub const DEMO_API_KEY: &str = "demo";

pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("ID must be a number: {}", raw)))
}

pub async fn fetch(
    provider: &dyn OverviewProvider,
    symbol: &str,
    api_key: &str,
) -> Result<Overview, AppError> {
    let overview = provider.fetch_overview(symbol, api_key).await?;
    if overview.is_empty() {
        return Err(AppError::NotFound(format!("Invalid stock symbol: {}", symbol)));
    }
    Ok(overview)
}

pub async fn fetch_and_save(
    provider: &dyn OverviewProvider,
    store: &dyn OverviewStore,
    symbol: &str,
    api_key: &str,
) -> Result<Overview, AppError> {
    let overview = fetch(provider, symbol, api_key).await?;
    // Never trust an id coming from outside the store.
    let saved = store.create(overview.without_id()).await?;
    info!("Saved overview {} with id {:?}", symbol, saved.id);
    Ok(saved)
}

pub async fn list_all(store: &dyn OverviewStore) -> Result<Vec<Overview>, AppError> {
    Ok(store.find_all().await?)
}

pub async fn get_by_id(store: &dyn OverviewStore, raw_id: &str) -> Result<Overview, AppError> {
    let id = parse_id(raw_id)?;
    store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Overview {} did not match any record", id)))
}

pub async fn get_by_symbol(store: &dyn OverviewStore, symbol: &str) -> Result<Overview, AppError> {
    store
        .find_by_symbol(symbol)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Symbol {} did not match any record", symbol)))
}

pub async fn get_by_name(store: &dyn OverviewStore, name: &str) -> Result<Overview, AppError> {
    store
        .find_by_name(name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Name {} did not match any record", name)))
}

pub async fn list_by_exchange(store: &dyn OverviewStore, exchange: &str) -> Result<Vec<Overview>, AppError> {
    Ok(store.find_by_exchange(exchange).await?)
}

pub async fn list_by_sector(store: &dyn OverviewStore, sector: &str) -> Result<Vec<Overview>, AppError> {
    Ok(store.find_by_sector(sector).await?)
}

pub async fn list_by_country(store: &dyn OverviewStore, country: &str) -> Result<Vec<Overview>, AppError> {
    Ok(store.find_by_country(country).await?)
}

pub async fn list_by_currency(store: &dyn OverviewStore, currency: &str) -> Result<Vec<Overview>, AppError> {
    Ok(store.find_by_currency(currency).await?)
}

pub async fn delete_all(store: &dyn OverviewStore) -> Result<DeleteAllResult, AppError> {
    let existing = store.count().await?;
    if existing == 0 {
        return Ok(DeleteAllResult {
            deleted: 0,
            message: "No stock to delete".to_string(),
        });
    }

    let deleted = store.delete_all().await? as i64;
    Ok(DeleteAllResult {
        deleted,
        message: format!("Deleted all stocks: {}", deleted),
    })
}

pub async fn delete_by_id(store: &dyn OverviewStore, raw_id: &str) -> Result<Overview, AppError> {
    let id = parse_id(raw_id)?;
    store
        .delete_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Overview {} did not match any record", id)))
}
