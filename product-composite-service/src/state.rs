use crate::service::ProductCompositeService;

/// Shared state handed to the router; wired explicitly at process start.
#[derive(Clone)]
pub struct AppState {
    pub service: ProductCompositeService,
}

impl AppState {
    pub fn new(service: ProductCompositeService) -> Self {
        Self { service }
    }
}
