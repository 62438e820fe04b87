use std::sync::Arc;

use crate::service::RankingService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RankingService>,
}
