use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::{info, warn};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/apikey", get(api_key_status))
}

async fn root() -> &'static str {
    info!("GET / - Root");
    "Root"
}

#[derive(Debug, Serialize)]
pub struct ApiKeyStatus {
    pub configured: bool,
}

// Reports whether a provider key is loaded. The key itself is never returned.
async fn api_key_status(State(state): State<AppState>) -> Json<ApiKeyStatus> {
    warn!("GET /apikey - Key value is not exposed, reporting status only");
    Json(ApiKeyStatus {
        configured: !state.api_key.trim().is_empty(),
    })
}
