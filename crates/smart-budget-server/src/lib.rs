//! Smart Budget Web Server
//!
//! Axum-based JSON API for the Smart Budget tracker.
//!
//! Security features:
//! - Restrictive CORS policy (same-origin unless origins are listed)
//! - Security headers on every response
//! - Input validation (month keys, days, amounts, budget limits)
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, warn};

use smart_budget_core::ai::{AIBackend, AIClient};
use smart_budget_core::{AppConfig, Database, InsightEngine, MonthKey};

mod handlers;

/// Maximum accepted backup upload size (10 MB)
pub const MAX_IMPORT_SIZE: usize = 10 * 1024 * 1024;

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// Currency code appended to amounts in insight messages
    pub currency: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![],
            currency: smart_budget_core::format::DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            allowed_origins: config.server.allowed_origins.clone(),
            currency: config.display.currency.clone(),
        }
    }
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
    pub ai: Option<AIClient>,
    pub engine: InsightEngine,
}

/// Success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
pub fn create_router(
    db: Database,
    static_dir: Option<&str>,
    config: ServerConfig,
    ai: Option<AIClient>,
) -> Router {
    match ai {
        Some(ref client) => info!(
            "AI backend configured: {} (model: {})",
            client.host(),
            client.model()
        ),
        None => info!("ℹ️  AI backend not configured (set GEMINI_API_KEY to enable tips)"),
    }

    let engine = InsightEngine::new().with_currency(config.currency.clone());

    let state = Arc::new(AppState {
        db,
        config: config.clone(),
        ai,
        engine,
    });

    let api_routes = Router::new()
        // Months
        .route("/months", get(handlers::list_months))
        .route("/months/:month", get(handlers::get_month))
        .route("/months/:month/dashboard", get(handlers::get_dashboard))
        // Transactions
        .route(
            "/months/:month/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route("/transactions/:id", delete(handlers::delete_transaction))
        // Budget
        .route("/months/:month/budget", put(handlers::set_budget))
        // Insights and tips
        .route("/months/:month/insights", get(handlers::get_insights))
        .route("/months/:month/tip", get(handlers::get_tip))
        // View settings
        .route(
            "/settings",
            get(handlers::get_settings).put(handlers::update_settings),
        )
        // Backup
        .route("/export", get(handlers::export_backup))
        .route(
            "/import",
            post(handlers::import_backup).layer(DefaultBodyLimit::max(MAX_IMPORT_SIZE)),
        );

    // Restrictive default: same-origin only unless origins are configured
    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);
    if !config.allowed_origins.is_empty() {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        cors = cors.allow_origin(origins);
    }

    // CSP: same-origin scripts, inline styles for the front end's utility classes
    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; font-src 'self'; connect-src 'self'; frame-ancestors 'none'",
    );

    let mut app = Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    // Serve static files if directory provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server
pub async fn serve(
    db: Database,
    app_config: &AppConfig,
    static_dir: Option<&str>,
) -> anyhow::Result<()> {
    let ai = AIClient::from_config(&app_config.ai);
    check_ai_connection(ai.as_ref()).await;

    let config = ServerConfig::from_app_config(app_config);
    let app = create_router(db, static_dir, config, ai);
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check and log AI backend connection status
async fn check_ai_connection(ai: Option<&AIClient>) {
    let Some(client) = ai else {
        return;
    };

    if client.health_check().await {
        info!(
            "✅ AI backend connected: {} ({})",
            client.host(),
            client.model()
        );
    } else {
        warn!(
            "⚠️  AI backend configured but not responding: {} ({})",
            client.host(),
            client.model()
        );
    }
}

/// Parse a `YYYY-MM` path segment
pub(crate) fn parse_month(value: &str) -> Result<MonthKey, AppError> {
    value
        .parse()
        .map_err(|_| AppError::bad_request("Invalid month, expected YYYY-MM"))
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map core errors: validation failures to 400, missing records to 404
    pub fn from_core(err: smart_budget_core::Error) -> Self {
        use smart_budget_core::Error;
        match err {
            Error::InvalidData(msg) => Self::bad_request(&msg),
            Error::NotFound(msg) => Self::not_found(&msg),
            other => other.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
