use crate::service::ReviewService;

/// Shared state handed to the router; wired explicitly at process start.
#[derive(Clone)]
pub struct AppState {
    pub service: ReviewService,
}

impl AppState {
    pub fn new(service: ReviewService) -> Self {
        Self { service }
    }
}
