use axum::{extract::Request, routing::get, Router, ServiceExt};
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::constants::{FAVICON_PATH, ROOT_PATH};
use crate::error::{Result, UtilsError};
use crate::handlers::{default_root_handler, no_content_handler};

/// Router with the default root and favicon routes registered.
///
/// Callers merge or nest their own routes into it before serving.
pub fn new_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route(ROOT_PATH, get(default_root_handler))
        .route(FAVICON_PATH, get(no_content_handler))
}

/// Strip trailing slashes from every request path before routing
pub fn normalize_trailing_slash(router: Router) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Build the final service: request tracing plus trailing-slash normalization
pub fn create_server(router: Router) -> NormalizePath<Router> {
    normalize_trailing_slash(router.layer(TraceLayer::new_for_http()))
}

/// Bind a listener on the configured host and port. The host may be a name
/// such as `localhost`; port 0 picks a free port.
pub async fn bind_listener(config: &ServerConfig) -> Result<TcpListener> {
    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(|e| {
            UtilsError::Config(format!(
                "Failed to bind {}:{}: {}",
                config.host, config.port, e
            ))
        })?;
    debug!(addr = %listener.local_addr()?, "listener bound");
    Ok(listener)
}

/// Serve `router` on an already bound listener until the process exits
pub async fn serve(listener: TcpListener, router: Router) -> Result<()> {
    info!("HTTP server started");
    let app = create_server(router);
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;
    Ok(())
}

/// Bind to the configured address and serve `router`
pub async fn start_server(config: &ServerConfig, router: Router) -> Result<()> {
    let listener = bind_listener(config).await?;
    serve(listener, router).await
}
