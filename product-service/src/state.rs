use crate::service::ProductService;

/// Shared state handed to the router; wired explicitly at process start.
#[derive(Clone)]
pub struct AppState {
    pub service: ProductService,
}

impl AppState {
    pub fn new(service: ProductService) -> Self {
        Self { service }
    }
}
