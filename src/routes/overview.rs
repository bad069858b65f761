use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{DeleteAllResult, Overview};
use crate::services::overview_service::{self, DEMO_API_KEY, DEMO_SYMBOL};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/test", get(test_overview).post(test_upload_overview))
        .route("/all", get(get_all_overviews).delete(delete_all_overviews))
        .route("/stockid/:id", get(get_overview_by_id))
        .route("/stockid/:id", delete(delete_overview_by_id))
        .route("/stocksymbol/:symbol", get(get_overview_by_symbol))
        .route("/stockname/:name", get(get_overview_by_name))
        .route("/stockexchange/:exchange", get(get_overviews_by_exchange))
        .route("/stocksector/:sector", get(get_overviews_by_sector))
        .route("/stockcountry/:country", get(get_overviews_by_country))
        .route("/stockcurrency/:currency", get(get_overviews_by_currency))
        .route("/:symbol", get(fetch_overview).post(upload_overview))
}

fn log_failure<T>(context: &str, result: Result<T, AppError>) -> Result<T, AppError> {
    result.map_err(|e| {
        error!("{}: {}", context, e);
        e
    })
}

pub async fn test_overview(State(state): State<AppState>) -> Result<Json<Overview>, AppError> {
    info!("GET /api/overview/test - Fetching demo overview");
    let overview = overview_service::fetch(state.provider.as_ref(), DEMO_SYMBOL, DEMO_API_KEY).await;
    Ok(Json(log_failure("Failed to fetch demo overview", overview)?))
}

pub async fn test_upload_overview(State(state): State<AppState>) -> Result<Json<Overview>, AppError> {
    info!("POST /api/overview/test - Saving demo overview");
    let saved = overview_service::fetch_and_save(
        state.provider.as_ref(),
        state.store.as_ref(),
        DEMO_SYMBOL,
        DEMO_API_KEY,
    )
    .await;
    Ok(Json(log_failure("Failed to save demo overview", saved)?))
}

pub async fn fetch_overview(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<Overview>, AppError> {
    info!("GET /api/overview/{} - Fetching overview from provider", symbol);
    let overview = overview_service::fetch(state.provider.as_ref(), &symbol, &state.api_key).await;
    Ok(Json(log_failure(&format!("Failed to fetch overview {}", symbol), overview)?))
}

pub async fn upload_overview(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<Overview>, AppError> {
    info!("POST /api/overview/{} - Fetching and saving overview", symbol);
    let saved = overview_service::fetch_and_save(
        state.provider.as_ref(),
        state.store.as_ref(),
        &symbol,
        &state.api_key,
    )
    .await;
    Ok(Json(log_failure(&format!("Failed to save overview {}", symbol), saved)?))
}

pub async fn get_all_overviews(State(state): State<AppState>) -> Result<Json<Vec<Overview>>, AppError> {
    info!("GET /api/overview/all - Fetching all overviews");
    let overviews = overview_service::list_all(state.store.as_ref()).await;
    Ok(Json(log_failure("Failed to fetch overviews", overviews)?))
}

pub async fn get_overview_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Overview>, AppError> {
    info!("GET /api/overview/stockid/{} - Fetching overview", id);
    let overview = overview_service::get_by_id(state.store.as_ref(), &id).await;
    Ok(Json(log_failure(&format!("Failed to fetch overview {}", id), overview)?))
}

pub async fn get_overview_by_symbol(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<Overview>, AppError> {
    info!("GET /api/overview/stocksymbol/{} - Fetching overview", symbol);
    let overview = overview_service::get_by_symbol(state.store.as_ref(), &symbol).await;
    Ok(Json(log_failure(&format!("Failed to fetch overview {}", symbol), overview)?))
}

pub async fn get_overview_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Overview>, AppError> {
    info!("GET /api/overview/stockname/{} - Fetching overview", name);
    let overview = overview_service::get_by_name(state.store.as_ref(), &name).await;
    Ok(Json(log_failure(&format!("Failed to fetch overview named {}", name), overview)?))
}

pub async fn get_overviews_by_exchange(
    State(state): State<AppState>,
    Path(exchange): Path<String>,
) -> Result<Json<Vec<Overview>>, AppError> {
    info!("GET /api/overview/stockexchange/{} - Fetching overviews", exchange);
    let overviews = overview_service::list_by_exchange(state.store.as_ref(), &exchange).await;
    Ok(Json(log_failure(&format!("Failed to fetch overviews on {}", exchange), overviews)?))
}

pub async fn get_overviews_by_sector(
    State(state): State<AppState>,
    Path(sector): Path<String>,
) -> Result<Json<Vec<Overview>>, AppError> {
    info!("GET /api/overview/stocksector/{} - Fetching overviews", sector);
    let overviews = overview_service::list_by_sector(state.store.as_ref(), &sector).await;
    Ok(Json(log_failure(&format!("Failed to fetch overviews in {}", sector), overviews)?))
}

pub async fn get_overviews_by_country(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<Vec<Overview>>, AppError> {
    info!("GET /api/overview/stockcountry/{} - Fetching overviews", country);
    let overviews = overview_service::list_by_country(state.store.as_ref(), &country).await;
    Ok(Json(log_failure(&format!("Failed to fetch overviews in {}", country), overviews)?))
}

pub async fn get_overviews_by_currency(
    State(state): State<AppState>,
    Path(currency): Path<String>,
) -> Result<Json<Vec<Overview>>, AppError> {
    info!("GET /api/overview/stockcurrency/{} - Fetching overviews", currency);
    let overviews = overview_service::list_by_currency(state.store.as_ref(), &currency).await;
    Ok(Json(log_failure(&format!("Failed to fetch overviews in {}", currency), overviews)?))
}

pub async fn delete_all_overviews(State(state): State<AppState>) -> Result<Json<DeleteAllResult>, AppError> {
    info!("DELETE /api/overview/all - Deleting all overviews");
    let result = overview_service::delete_all(state.store.as_ref()).await;
    Ok(Json(log_failure("Failed to delete overviews", result)?))
}

pub async fn delete_overview_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Overview>, AppError> {
    info!("DELETE /api/overview/stockid/{} - Deleting overview", id);
    let deleted = overview_service::delete_by_id(state.store.as_ref(), &id).await;
    Ok(Json(log_failure(&format!("Failed to delete overview {}", id), deleted)?))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::app::create_app;
    use crate::external::overview_provider::{OverviewProvider, ProviderError};
    use crate::models::Overview;
    use crate::state::AppState;
    use crate::store::memory::MemoryOverviewStore;

    struct StubProvider;

    #[async_trait]
    impl OverviewProvider for StubProvider {
        async fn fetch_overview(&self, symbol: &str, _api_key: &str) -> Result<Overview, ProviderError> {
            let (name, exchange, sector) = match symbol {
                "IBM" => ("International Business Machines", "NYSE", "TECHNOLOGY"),
                "MSFT" => ("Microsoft Corporation", "NASDAQ", "TECHNOLOGY"),
                "XOM" => ("Exxon Mobil Corp", "NYSE", "ENERGY & TRANSPORTATION"),
                "DOWN" => return Err(ProviderError::Network("connection refused".into())),
                _ => return Ok(Overview::default()),
            };
            Ok(Overview {
                symbol: Some(symbol.to_string()),
                name: Some(name.to_string()),
                exchange: Some(exchange.to_string()),
                sector: Some(sector.to_string()),
                country: Some("USA".to_string()),
                currency: Some("USD".to_string()),
                pe_ratio: Some("21.3".to_string()),
                ..Default::default()
            })
        }
    }

    fn app() -> axum::Router {
        create_app(AppState {
            store: Arc::new(MemoryOverviewStore::new()),
            provider: Arc::new(StubProvider),
            api_key: "secret-key".to_string(),
        })
    }

    async fn send(app: &axum::Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn without_id(mut value: Value) -> Value {
        value.as_object_mut().unwrap().remove("id");
        value
    }

    #[tokio::test]
    async fn test_fetch_only_does_not_persist() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/overview/IBM").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["symbol"], "IBM");
        assert!(body["id"].is_null());

        let (_, all) = send(&app, "GET", "/api/overview/all").await;
        assert_eq!(all.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_post_persists_then_conflicts() {
        let app = app();
        let (status, first) = send(&app, "POST", "/api/overview/IBM").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["symbol"], "IBM");
        assert_eq!(first["id"], 1);

        let (status, second) = send(&app, "POST", "/api/overview/IBM").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(second["status"], 400);
        assert!(second["message"].as_str().unwrap().contains("duplicate"));
    }

    #[tokio::test]
    async fn test_fetch_and_persist_share_fields() {
        let app = app();
        let (_, fetched) = send(&app, "GET", "/api/overview/MSFT").await;
        let (_, saved) = send(&app, "POST", "/api/overview/MSFT").await;
        assert!(saved["id"].is_i64());
        assert_eq!(without_id(fetched), without_id(saved));
    }

    #[tokio::test]
    async fn test_round_trip_by_id() {
        let app = app();
        let (_, saved) = send(&app, "POST", "/api/overview/XOM").await;
        let (status, found) = send(&app, "GET", "/api/overview/stockid/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn test_unknown_symbol_is_not_found() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/overview/NOPE").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Invalid stock symbol: NOPE");

        let (status, _) = send(&app, "POST", "/api/overview/NOPE").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_provider_failure_is_internal() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/overview/DOWN").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], 500);
    }

    #[tokio::test]
    async fn test_demo_routes_use_demo_symbol() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/overview/test").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["symbol"], "IBM");

        let (status, body) = send(&app, "POST", "/api/overview/test").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 1);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_bad_request() {
        let app = app();
        for method in ["GET", "DELETE"] {
            let (status, body) = send(&app, method, "/api/overview/stockid/abc").await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["message"], "ID must be a number: abc");
        }
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let app = app();
        let (status, _) = send(&app, "GET", "/api/overview/stockid/999999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "DELETE", "/api/overview/stockid/999999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_by_id_returns_record() {
        let app = app();
        let (_, saved) = send(&app, "POST", "/api/overview/IBM").await;
        let (status, deleted) = send(&app, "DELETE", "/api/overview/stockid/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted, saved);

        let (status, _) = send(&app, "GET", "/api/overview/stockid/1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_all() {
        let app = app();
        let (status, body) = send(&app, "DELETE", "/api/overview/all").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], 0);
        assert_eq!(body["message"], "No stock to delete");

        send(&app, "POST", "/api/overview/IBM").await;
        send(&app, "POST", "/api/overview/MSFT").await;
        let (status, body) = send(&app, "DELETE", "/api/overview/all").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], 2);

        let (_, all) = send(&app, "GET", "/api/overview/all").await;
        assert!(all.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_field_lookups() {
        let app = app();
        for symbol in ["IBM", "MSFT", "XOM"] {
            send(&app, "POST", &format!("/api/overview/{}", symbol)).await;
        }

        let (status, body) = send(&app, "GET", "/api/overview/stocksymbol/MSFT").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Microsoft Corporation");

        let (status, _) = send(&app, "GET", "/api/overview/stocksymbol/AAPL").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = send(&app, "GET", "/api/overview/stockname/Exxon%20Mobil%20Corp").await;
        assert_eq!(body["symbol"], "XOM");

        let (_, body) = send(&app, "GET", "/api/overview/stockexchange/NYSE").await;
        let symbols: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["symbol"].as_str().unwrap())
            .collect();
        assert_eq!(symbols, vec!["IBM", "XOM"]);

        let (_, body) = send(&app, "GET", "/api/overview/stocksector/TECHNOLOGY").await;
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, body) = send(&app, "GET", "/api/overview/stocksector/UTILITIES").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());

        let (_, body) = send(&app, "GET", "/api/overview/stockcountry/USA").await;
        assert_eq!(body.as_array().unwrap().len(), 3);

        let (_, body) = send(&app, "GET", "/api/overview/stockcurrency/EUR").await;
        assert!(body.as_array().unwrap().is_empty());
    }
}
