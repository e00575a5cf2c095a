use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{
        HeaderName, HeaderValue, Method, Request, Response,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal::{self, ctrl_c};
use tower::ServiceBuilder;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::config::ServerConfig;
use crate::infrastructure::AppContainer;
use crate::presentation::http::routes::{
    chat_routes, document_routes, download_routes, events_routes, health_routes, profile_routes,
    root_handler, user_routes,
};

const REQUEST_ID_HEADER: &str = "x-request-id";

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(60 * 60))
}

/// Full application router: every API route under `/api/v1` with the
/// request-id, tracing, CORS and body-limit layers applied.
pub fn build_router(container: &AppContainer) -> Router {
    let server = &container.config.server;
    let body_limit = container.config.body_limit_bytes();
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let api = Router::new()
        .merge(health_routes())
        .merge(user_routes(container.user_handler.clone()))
        .merge(profile_routes(container.profile_handler.clone()))
        .merge(document_routes(container.document_handler.clone()))
        .merge(download_routes(container.download_handler.clone()))
        .merge(chat_routes(container.chat_handler.clone()))
        .merge(events_routes(container.events_handler.clone()));

    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            let request_id = request
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id,
            )
        })
        .on_request(|_request: &Request<_>, _span: &Span| {
            tracing::debug!("Received request");
        })
        .on_response(|response: &Response<_>, latency: Duration, _span: &Span| {
            tracing::info!(
                "Response: {} (took {} ms)",
                response.status(),
                latency.as_millis()
            );
        })
        .on_failure(
            |error: ServerErrorsFailureClass, latency: Duration, _span: &Span| {
                tracing::error!(
                    "Request failed: {:?} (took {} ms)",
                    error,
                    latency.as_millis()
                );
            },
        );

    Router::new()
        .route("/", get(root_handler))
        .nest("/api/v1", api)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(trace)
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(RequestBodyLimitLayer::new(body_limit))
                .layer(cors_layer(server)),
        )
}

pub struct HttpServer {
    container: AppContainer,
}

impl HttpServer {
    pub fn new(container: AppContainer) -> Self {
        Self { container }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        // Start document-ready watcher
        let watcher = self.container.ready_watcher().spawn();

        let app = build_router(&self.container);
        let addr = self.container.config.bind_address();

        let listener = TcpListener::bind(&addr).await?;
        tracing::info!("Server running on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        watcher.abort();
        tracing::info!("Server shut down");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
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
}
