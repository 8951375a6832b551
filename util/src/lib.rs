//! Cross-cutting pieces every service binary wires in at start: the YAML/env
//! configuration loader, the HTTP error body and its response mapping, the
//! service-address reporter, and tracing initialisation.

pub mod config;
pub mod http;
pub mod service_util;

pub use config::{AppConfig, ConfigError, ServiceEndpoint};
pub use http::HttpErrorInfo;
pub use service_util::ServiceUtil;

use tracing_subscriber::EnvFilter;

/// Initialise the global `tracing` subscriber.
///
/// Reads `RUST_LOG` when set, defaults to info with per-request tower-http
/// logging at debug.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".parse().unwrap()),
        )
        .init();
}
