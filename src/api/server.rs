use std::collections::HashMap;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::api::{add_hotel, list_hotels, AppState};
use crate::config::{AppConfig, ConfigError};
use crate::storage::{DynamoListingStore, S3ObjectStore};

pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            // JSON format for CloudWatch
            fmt::layer().json().with_target(false),
        )
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,tower=warn")),
        )
        .init();
}

/// Build the AWS-backed handler state from environment configuration.
pub async fn build_state(config: AppConfig) -> AppState {
    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .load()
        .await;

    let object_store = Arc::new(S3ObjectStore::new(&sdk_config, config.bucket_name.clone()));
    let listing_store = Arc::new(DynamoListingStore::new(
        &sdk_config,
        config.table_name.clone(),
    ));

    AppState {
        config,
        object_store,
        listing_store,
    }
}

pub async fn create_app() -> Result<Router, ConfigError> {
    let config = AppConfig::from_env()?;
    info!(
        region = %config.region,
        bucket = %config.bucket_name,
        table = %config.table_name,
        "configuration loaded"
    );

    let state = build_state(config).await;
    Ok(create_app_with_state(state))
}

pub fn create_app_with_state(state: AppState) -> Router {
    Router::new()
        .route("/hotels", post(add_hotel_http).get(list_hotels_http))
        .route("/health", get(health_check))
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> &'static str {
    "OK"
}

/// Adapt an HTTP upload into the gateway proxy record the handler consumes.
/// The body is carried base64-encoded, the same way the gateway marks
/// binary payloads.
async fn add_hotel_http(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = crate::api::event::ProxyRequest {
        body: Some(BASE64.encode(&body)),
        is_base64_encoded: true,
        query_string_parameters: None,
        headers: header_pairs(&headers),
    };
    into_http_response(add_hotel(&state, request).await)
}

async fn list_hotels_http(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    // An absent query string maps to an absent parameter map, matching the
    // gateway's null-vs-empty distinction.
    let query_string_parameters = query.map(|q| {
        serde_urlencoded::from_str::<HashMap<String, String>>(&q).unwrap_or_default()
    });
    let request = crate::api::event::ProxyRequest {
        body: None,
        is_base64_encoded: false,
        query_string_parameters,
        headers: header_pairs(&headers),
    };
    into_http_response(list_hotels(&state, request).await)
}

fn header_pairs(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

fn into_http_response(proxy: crate::api::event::ProxyResponse) -> Response {
    let status =
        StatusCode::from_u16(proxy.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = Response::new(axum::body::Body::from(proxy.body));
    *response.status_mut() = status;
    for (name, value) in &proxy.headers {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            response.headers_mut().insert(name, value);
        }
    }
    response
}

pub async fn run_server() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting hotel-admin server");

    let shutdown = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C signal handler");
        info!("Shutting down gracefully...");
    };

    let app = create_app().await?;

    let port = env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
