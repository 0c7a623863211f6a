//! Change-notification bus
//!
//! Every mutation publishes a versioned [`SyncPayload`]; clients subscribe
//! once (SSE) instead of polling each resource endpoint. Versions are
//! per-resource and monotonically increasing so a client can tell stale
//! data from fresh.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Capacity of the broadcast channel; lagging subscribers miss events
/// rather than block publishers
const CHANNEL_CAPACITY: usize = 1024;

/// 资源版本管理器
///
/// 使用 DashMap 实现无锁并发的版本号管理，每种资源类型维护独立的版本号。
#[derive(Debug, Default)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self::default()
    }

    /// 递增指定资源的版本号并返回新值
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// 获取指定资源的当前版本号（不存在时返回 0）
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

/// One change notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncPayload {
    /// Resource type ("order", "coupon", "category", ...)
    pub resource: String,
    /// Per-resource monotonic version
    pub version: u64,
    /// "created" | "updated" | "deleted"
    pub action: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Broadcast bus carrying sync payloads to all subscribers
#[derive(Debug, Clone)]
pub struct SyncBus {
    tx: broadcast::Sender<SyncPayload>,
}

impl SyncBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publish to all current subscribers. A send error only means nobody
    /// is listening, which is fine.
    pub fn publish(&self, payload: SyncPayload) {
        let _ = self.tx.send(payload);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncPayload> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SyncBus {
    fn default() -> Self {
        Self::new()
    }
}
