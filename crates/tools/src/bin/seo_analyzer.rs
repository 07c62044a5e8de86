//! SEO analysis tool server
//!
//! Single-endpoint MCP-style service; analysis is pure and stateless.

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::env;
use tracing::info;

use tools::seo;

#[derive(Deserialize)]
struct AnalyzeBody {
    text: String,
    focus_keyword: Option<String>,
}

async fn handle(Json(body): Json<AnalyzeBody>) -> (StatusCode, Json<Value>) {
    if body.text.trim().is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "text must be a non-empty string" })),
        );
    }

    let report = seo::analyze(&body.text, body.focus_keyword.as_deref());
    (StatusCode::OK, Json(json!({ "report": report })))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8733);

    let app = Router::new().route("/", post(handle));

    let addr = format!("0.0.0.0:{port}");
    info!("📈 SEO analyzer listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
