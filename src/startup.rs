use std::{net::SocketAddr, time::Duration};

use axum::{
    Router,
    http::{HeaderName, Request, Response},
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::{
    config::AppConfig,
    db::{create_orm_conn, create_pool},
    jobs::KeepAliveJob,
    migrate::{MigrationError, MigrationOutcome, PgSchema, run_migrations},
    routes::{create_api_router, doc::scalar_docs, not_found},
    state::AppState,
    store::OrmFavoriteStore,
};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Full HTTP application: API routes, docs, JSON 404 and the middleware stack.
pub fn build_app(state: AppState) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            let request_id = request
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id
            )
        })
        .on_request(|_request: &Request<_>, _span: &tracing::Span| {
            tracing::info!("request started");
        })
        .on_response(|response: &Response<_>, latency: Duration, _span: &tracing::Span| {
            tracing::info!(
                status = %response.status(),
                ms = %latency.as_millis(),
                "request finished"
            );
        });

    Router::new()
        .nest("/api", create_api_router())
        .merge(scalar_docs())
        .fallback(not_found)
        .layer(trace_layer)
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(1024 * 1024))
        .layer(ConcurrencyLimitLayer::new(100))
        .with_state(state)
}

/// MIGRATING → LISTENING or ABORTED. Only a fatal outcome stops startup.
pub fn proceed_after_migrations(outcome: MigrationOutcome) -> Result<(), MigrationError> {
    match outcome {
        MigrationOutcome::Fatal(err) => {
            tracing::error!(error = %err, "aborting startup");
            Err(err)
        }
        MigrationOutcome::DegradedContinue { .. } => {
            tracing::warn!("schema not ready, starting server anyway");
            Ok(())
        }
        MigrationOutcome::Migrated | MigrationOutcome::Recovered { .. } => Ok(()),
    }
}

/// Bootstrap: migrate, then listen. Returns only on a fatal startup error or
/// when the listener stops.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!(env = ?config.env, "starting");

    let pool = create_pool(&config.database_url, config.max_connections)?;
    let orm = create_orm_conn(pool.clone());

    let schema = PgSchema::new(pool, orm.clone(), &config.migrations_dir);
    proceed_after_migrations(run_migrations(&schema, config.env).await)?;

    if config.env.is_production() {
        match config.api_url.as_deref() {
            Some(api_url) => {
                KeepAliveJob::new(api_url, config.keep_alive_interval).start();
            }
            None => tracing::warn!("API_URL not set, keep-alive job disabled"),
        }
    }

    let state = AppState::new(OrmFavoriteStore::new(orm));
    let app = build_app(state);

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    tracing::info!("listening on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
