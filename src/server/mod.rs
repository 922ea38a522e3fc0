use crate::config::Config;
use crate::pipeline::{HttpPipelineClient, TranscodePipeline};
use anyhow::{Context, Result};
use axum::{
    http::{header, Method, StatusCode},
    middleware,
    response::IntoResponse,
    routing::get,
    Router,
};
use dashgate_core::ProfileRegistry;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod auth;
pub mod error;
pub mod openapi;
pub mod request_id;
pub mod routes_api;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    /// Validated configuration, fixed for the process lifetime
    pub config: Arc<Config>,
    /// Quality profiles: base tables merged with configured overrides
    pub profiles: Arc<ProfileRegistry>,
    /// External transcoding pipeline
    pub pipeline: Arc<dyn TranscodePipeline>,
}

impl AppContext {
    /// Build the context used by the running server
    pub fn from_config(config: Config) -> Self {
        let profiles = ProfileRegistry::with_overrides(&config.profiles);
        let pipeline = HttpPipelineClient::new(&config.pipeline);

        Self::new(config, Arc::new(pipeline), profiles)
    }

    /// Build a context around an arbitrary pipeline implementation
    pub fn new(config: Config, pipeline: Arc<dyn TranscodePipeline>, profiles: ProfileRegistry) -> Self {
        Self {
            config: Arc::new(config),
            profiles: Arc::new(profiles),
            pipeline,
        }
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // API routes (with optional auth) and Swagger UI at /api/docs
        .nest("/api", api_routes(&ctx).merge(openapi::openapi_routes()))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

fn api_routes(ctx: &AppContext) -> Router<AppContext> {
    // Always available, even when auth is enabled
    let open_routes = Router::new()
        .route("/", get(routes_api::index))
        .route("/auth/status", get(auth::auth_status));

    let protected_routes = routes_api::api_routes();

    let protected_routes = if ctx.config.auth.enabled {
        protected_routes.layer(middleware::from_fn_with_state(
            ctx.clone(),
            auth::api_auth_middleware,
        ))
    } else {
        protected_routes
    };

    open_routes.merge(protected_routes)
}

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Start the HTTP server and serve until a shutdown signal arrives
pub async fn start_server(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    tracing::info!(
        pipeline = %config.pipeline.id,
        endpoint = %config.pipeline.endpoint,
        auth = config.auth.enabled,
        "Using transcoding pipeline"
    );
    if !config.profiles.is_empty() {
        tracing::info!(
            dash = config.profiles.dash.len(),
            hls = config.profiles.hls.len(),
            "Loaded quality profile overrides"
        );
    }

    let ctx = AppContext::from_config(config);
    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
