//! Sync API 模块
//!
//! 变更通知：SSE 长连接推送每次资源变更，替代客户端轮询。

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use futures::Stream;
use futures::stream;
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;

use crate::core::ServerState;
use crate::sync::SyncPayload;
use crate::utils::{ApiResponse, ok};

/// GET /api/sync/events - 变更事件流 (SSE)
///
/// 每条事件 `event: sync`，data 为 [`SyncPayload`] JSON。掉队的订阅者丢弃
/// 错过的事件并继续接收，不会中断连接。
async fn events(
    State(state): State<ServerState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.sync.subscribe();

    let stream = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(payload) => {
                    let event = match sync_event(&payload) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!("Failed to serialize sync event: {e}");
                            continue;
                        }
                    };
                    return Some((Ok(event), rx));
                }
                // Slow consumer: skip what was missed, keep streaming
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!("SSE subscriber lagged, {missed} events dropped");
                    continue;
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

fn sync_event(payload: &SyncPayload) -> Result<Event, axum::Error> {
    Event::default().event("sync").json_data(payload)
}

/// Per-resource version snapshot, for clients reconnecting after a gap
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VersionSnapshot {
    resource: &'static str,
    version: u64,
}

/// GET /api/sync/versions - 当前各资源版本号
async fn versions(State(state): State<ServerState>) -> Json<ApiResponse<Vec<VersionSnapshot>>> {
    const RESOURCES: &[&str] = &[
        "order", "coupon", "customer", "category", "food", "table", "room",
    ];
    let snapshot = RESOURCES
        .iter()
        .map(|resource| VersionSnapshot {
            resource,
            version: state.resource_versions.get(resource),
        })
        .collect();
    ok(snapshot)
}

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/sync/events", get(events))
        .route("/api/sync/versions", get(versions))
}
