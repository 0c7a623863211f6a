//! 服务器状态
//!
//! [`ServerState`] 持有所有共享服务的引用（数据库、同步总线、版本管理），
//! 使用 Arc 实现浅拷贝。

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::sync::{ResourceVersions, SyncBus, SyncPayload};
use crate::utils::AppResult;

/// Shared application state handed to every handler
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 变更通知总线
    pub sync: SyncBus,
    /// 资源版本管理器 (broadcast_sync 自动递增版本号)
    pub resource_versions: Arc<ResourceVersions>,
}

impl ServerState {
    /// Initialize state with the on-disk database under `work_dir/database`
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db_dir = config.database_dir();
        std::fs::create_dir_all(&db_dir)
            .map_err(|e| crate::utils::AppError::internal(format!(
                "Failed to create database directory: {e}"
            )))?;
        let db_service = DbService::new(&db_dir).await?;
        Ok(Self::with_db(config.clone(), db_service))
    }

    /// Initialize state over an in-memory database (test suite)
    pub async fn in_memory(config: Config) -> AppResult<Self> {
        let db_service = DbService::memory().await?;
        Ok(Self::with_db(config, db_service))
    }

    fn with_db(config: Config, db_service: DbService) -> Self {
        Self {
            config,
            db: db_service.db,
            sync: SyncBus::new(),
            resource_versions: Arc::new(ResourceVersions::new()),
        }
    }

    /// 广播资源变更通知
    ///
    /// # 参数
    /// - `resource`: 资源类型 (如 "order", "coupon", "category")
    /// - `action`: 变更类型 ("created", "updated", "deleted")
    /// - `id`: 资源 ID
    /// - `data`: 资源数据 (deleted 时为 None)
    pub fn broadcast_sync<T: serde::Serialize>(
        &self,
        resource: &str,
        action: &str,
        id: &str,
        data: Option<&T>,
    ) {
        let version = self.resource_versions.increment(resource);
        self.sync.publish(SyncPayload {
            resource: resource.to_string(),
            version,
            action: action.to_string(),
            id: id.to_string(),
            data: data.and_then(|d| serde_json::to_value(d).ok()),
        });
    }
}
