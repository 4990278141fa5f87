/*!
courtstats REST API Server

Serves a precomputed analysis over HTTP: chart pages for browsers, JSON for
programmatic use. The dataset is loaded once at startup; every handler reads
the same immutable state.

## Usage

```bash
courtstats-rest --data all_seasons.csv --host 127.0.0.1 --port 3334
```

## Endpoints

- `GET /` - Index page embedding all four charts
- `GET /api/v1/analysis` - Full analysis report as JSON
- `GET /api/v1/charts/{name}` - Single Vega-Lite spec (tallest|scorers|teams|ages)
- `GET /api/v1/health` - Health check
- `GET /api/v1/version` - Version information
*/

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use clap::Parser;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use courtstats::render::page;
use courtstats::render::vegalite::{histogram_spec, horizontal_bar_spec, vertical_bar_spec};
use courtstats::{run_pipeline, Analysis, VERSION};

/// CLI arguments for the REST API server
#[derive(Parser)]
#[command(name = "courtstats-rest")]
#[command(about = "courtstats REST API Server")]
#[command(version = VERSION)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind to
    #[arg(long, default_value = "3334")]
    port: u16,

    /// CORS allowed origins (comma-separated)
    #[arg(long, default_value = "*")]
    cors_origin: String,

    /// Path to the player-season CSV file
    #[arg(long, default_value = "all_seasons.csv")]
    data: String,
}

/// Shared application state: the analysis, computed once at startup
#[derive(Clone)]
struct AppState {
    analysis: Arc<Analysis>,
}

// ============================================================================
// Response Types
// ============================================================================

/// Successful API response
#[derive(Debug, Serialize)]
struct ApiSuccess<T> {
    status: String,
    data: T,
}

/// Error API response
#[derive(Debug, Serialize)]
struct ApiError {
    status: String,
    error: ErrorDetails,
}

#[derive(Debug, Serialize)]
struct ErrorDetails {
    message: String,
    #[serde(rename = "type")]
    error_type: String,
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Version response
#[derive(Debug, Serialize)]
struct VersionResponse {
    version: String,
    charts: Vec<String>,
}

/// Custom error type for API responses
struct ApiErrorResponse {
    status: StatusCode,
    error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let json = Json(self.error);
        (self.status, json).into_response()
    }
}

impl ApiErrorResponse {
    fn not_found(message: String) -> Self {
        ApiErrorResponse {
            status: StatusCode::NOT_FOUND,
            error: ApiError {
                status: "error".to_string(),
                error: ErrorDetails {
                    message,
                    error_type: "NotFound".to_string(),
                },
            },
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Names under which the four charts are served.
const CHART_NAMES: [&str; 4] = ["tallest", "scorers", "teams", "ages"];

fn chart_spec(analysis: &Analysis, name: &str) -> Option<serde_json::Value> {
    match name {
        "tallest" => Some(horizontal_bar_spec(&analysis.tallest_chart())),
        "scorers" => Some(vertical_bar_spec(&analysis.scorers_chart())),
        "teams" => Some(vertical_bar_spec(&analysis.teams_chart())),
        "ages" => Some(histogram_spec(&analysis.ages_chart())),
        _ => None,
    }
}

/// GET / - Index page embedding all four charts
async fn root_handler(State(state): State<AppState>) -> Html<String> {
    let analysis = &state.analysis;
    let charts = vec![
        (
            analysis.tallest_chart().title,
            horizontal_bar_spec(&analysis.tallest_chart()),
        ),
        (
            analysis.scorers_chart().title,
            vertical_bar_spec(&analysis.scorers_chart()),
        ),
        (
            analysis.teams_chart().title,
            vertical_bar_spec(&analysis.teams_chart()),
        ),
        (
            analysis.ages_chart().title,
            histogram_spec(&analysis.ages_chart()),
        ),
    ];
    Html(page::index_page("Player-Season Analysis", &charts))
}

/// GET /api/v1/analysis - Full analysis report
async fn analysis_handler(State(state): State<AppState>) -> Json<ApiSuccess<Analysis>> {
    Json(ApiSuccess {
        status: "success".to_string(),
        data: state.analysis.as_ref().clone(),
    })
}

/// GET /api/v1/charts/{name} - Single Vega-Lite spec
async fn chart_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiSuccess<serde_json::Value>>, ApiErrorResponse> {
    match chart_spec(&state.analysis, &name) {
        Some(spec) => Ok(Json(ApiSuccess {
            status: "success".to_string(),
            data: spec,
        })),
        None => Err(ApiErrorResponse::not_found(format!(
            "Unknown chart '{}'. Available: {}",
            name,
            CHART_NAMES.join(", ")
        ))),
    }
}

/// GET /api/v1/health - Health check
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: VERSION.to_string(),
    })
}

/// GET /api/v1/version - Version information
async fn version_handler() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: VERSION.to_string(),
        charts: CHART_NAMES.iter().map(|s| s.to_string()).collect(),
    })
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courtstats_rest=info,courtstats=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Run the pipeline once; handlers serve the frozen result
    info!("Loading and analyzing {}", cli.data);
    let analysis = run_pipeline(&cli.data)?;

    let state = AppState {
        analysis: Arc::new(analysis),
    };

    // Configure CORS
    let cors = if cli.cors_origin == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(vec![header::CONTENT_TYPE])
    } else {
        let origins: Vec<_> = cli
            .cors_origin
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(vec![header::CONTENT_TYPE])
    };

    // Build router
    let app = Router::new()
        .route("/", get(root_handler))
        .route("/api/v1/analysis", get(analysis_handler))
        .route("/api/v1/charts/{name}", get(chart_handler))
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/version", get(version_handler))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state);

    // Parse bind address
    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;

    info!("Starting courtstats REST API server on {}", addr);
    info!("  GET  /                     - Chart index page");
    info!("  GET  /api/v1/analysis      - Analysis report");
    info!("  GET  /api/v1/charts/{{name}} - Single chart spec");
    info!("  GET  /api/v1/health        - Health check");
    info!("  GET  /api/v1/version       - Version info");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
