//! Blog draft store tool server
//!
//! Single-endpoint MCP-style service holding drafts in an in-process TTL
//! cache. State does not survive a restart.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Duration;
use serde::Deserialize;
use serde_json::{json, Value};
use std::env;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use tools::cache::{DraftCache, SystemClock};

#[derive(Deserialize)]
#[serde(tag = "method", content = "params", rename_all = "snake_case")]
enum ToolCall {
    SaveDraft {
        id: Option<String>,
        title: String,
        content: String,
    },
    GetDraft {
        id: String,
    },
    ListDrafts,
    DeleteDraft {
        id: String,
    },
}

async fn handle(
    State(cache): State<Arc<DraftCache>>,
    Json(call): Json<ToolCall>,
) -> (StatusCode, Json<Value>) {
    match call {
        ToolCall::SaveDraft { id, title, content } => {
            let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
            let draft = cache.put(&id, &title, &content);
            (StatusCode::OK, Json(json!({ "draft": draft })))
        }
        ToolCall::GetDraft { id } => match cache.get(&id) {
            Some(draft) => (StatusCode::OK, Json(json!({ "draft": draft }))),
            None => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Draft not found" })),
            ),
        },
        ToolCall::ListDrafts => {
            let drafts = cache.list();
            (StatusCode::OK, Json(json!({ "drafts": drafts })))
        }
        ToolCall::DeleteDraft { id } => {
            if cache.invalidate(&id) {
                (StatusCode::OK, Json(json!({ "deleted": true })))
            } else {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Draft not found" })),
                )
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let ttl_minutes: i64 = env::var("DRAFT_TTL_MINUTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(120);
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8731);

    let cache = Arc::new(DraftCache::new(
        Duration::minutes(ttl_minutes),
        Arc::new(SystemClock),
    ));

    let app = Router::new().route("/", post(handle)).with_state(cache);

    let addr = format!("0.0.0.0:{port}");
    info!("📝 Draft store listening on {} (ttl {}m)", addr, ttl_minutes);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
