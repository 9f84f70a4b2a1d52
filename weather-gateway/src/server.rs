//! HTTP entry point: GraphQL endpoint, the two static pages and `/css`.

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;
use weather_core::{Config, RunMode, WeatherService};

use crate::{
    graphql::{WeatherSchema, build_schema},
    pages::{Page, PageRenderer},
};

pub const GRAPHQL_PATH: &str = "/graphql";

#[derive(Clone)]
pub struct AppState {
    pub schema: WeatherSchema,
    pub pages: Arc<PageRenderer>,
}

pub fn router(state: AppState, config: &Config) -> Router {
    let graphql = if config.mode.is_development() {
        get(graphiql).post(graphql_handler)
    } else {
        post(graphql_handler)
    };

    let router = Router::new()
        .route("/", get(landing))
        .route("/about", get(about))
        .route(GRAPHQL_PATH, graphql)
        .nest_service("/css", ServeDir::new(config.static_dir.join("css")))
        .with_state(state)
        .layer(CompressionLayer::new());

    match config.mode {
        RunMode::Development => router.layer(TraceLayer::new_for_http()),
        RunMode::Production => router,
    }
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: Config, service: WeatherService) -> Result<()> {
    let pages = PageRenderer::load(&config.static_dir.join("pages"));
    let state = AppState {
        schema: build_schema(service, config.mode),
        pages: Arc::new(pages),
    };
    let app = router(state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("server running on: http://localhost:{}{GRAPHQL_PATH}", config.port);
    info!("landing page: http://localhost:{}/", config.port);
    info!("about page: http://localhost:{}/about", config.port);
    info!(mode = %config.mode, "mode");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

async fn landing(State(state): State<AppState>) -> Html<String> {
    Html(state.pages.render(Page::Landing))
}

async fn about(State(state): State<AppState>) -> Html<String> {
    Html(state.pages.render(Page::About))
}

async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}
