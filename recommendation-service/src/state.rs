use crate::service::RecommendationService;

/// Shared state handed to the router; wired explicitly at process start.
#[derive(Clone)]
pub struct AppState {
    pub service: RecommendationService,
}

impl AppState {
    pub fn new(service: RecommendationService) -> Self {
        Self { service }
    }
}
