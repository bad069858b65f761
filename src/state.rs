use std::sync::Arc;
use crate::external::overview_provider::OverviewProvider;
use crate::store::OverviewStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn OverviewStore>,
    pub provider: Arc<dyn OverviewProvider>,
    pub api_key: String,
}
