//! Research search proxy tool server
//!
//! Single-endpoint MCP-style service that forwards queries to a configured
//! search API and passes the results through untouched.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::env;
use std::sync::Arc;
use tracing::{info, warn};

struct ProxyState {
    client: reqwest::Client,
    search_url: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct SearchBody {
    query: String,
    limit: Option<u32>,
}

async fn handle(
    State(state): State<Arc<ProxyState>>,
    Json(body): Json<SearchBody>,
) -> (StatusCode, Json<Value>) {
    let query = body.query.trim();
    if query.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "query must be a non-empty string" })),
        );
    }
    let limit = body.limit.unwrap_or(10).clamp(1, 25).to_string();

    let mut request = state
        .client
        .get(&state.search_url)
        .query(&[("q", query), ("count", limit.as_str())]);
    if let Some(key) = &state.api_key {
        request = request.bearer_auth(key);
    }

    match request.send().await {
        Ok(response) if response.status().is_success() => match response.json::<Value>().await {
            Ok(results) => (StatusCode::OK, Json(json!({ "results": results }))),
            Err(e) => {
                warn!("Search API returned unparsable body: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": "Search API returned an invalid response" })),
                )
            }
        },
        Ok(response) => {
            warn!("Search API returned {}", response.status());
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "Search API request failed" })),
            )
        }
        Err(e) => {
            warn!("Search API unreachable: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "Search API unreachable" })),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let search_url = env::var("SEARCH_API_URL")
        .unwrap_or_else(|_| "https://api.search.brave.com/res/v1/web/search".to_string());
    let api_key = env::var("SEARCH_API_KEY").ok();
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8732);

    let state = Arc::new(ProxyState {
        client: reqwest::Client::new(),
        search_url,
        api_key,
    });

    let app = Router::new().route("/", post(handle)).with_state(state);

    let addr = format!("0.0.0.0:{port}");
    info!("🔎 Research proxy listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
