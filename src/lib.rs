//! Savor Server - 餐厅/酒店点餐服务
//!
//! # 架构概述
//!
//! 嵌入式单体服务：HTTP API + 内嵌 SurrealDB，核心功能：
//!
//! - **下单结算** (`checkout`): 校验、客户建档、优惠券结算、事务落库
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储（模型 + 仓储）
//! - **HTTP API** (`api`): RESTful API 接口
//! - **变更通知** (`sync`): 版本化变更总线 + SSE 推送
//!
//! # 模块结构
//!
//! ```text
//! src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── checkout/      # 下单管线（校验、折扣、优惠券）
//! ├── sync/          # 变更通知总线
//! ├── db/            # 数据库层
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod checkout;
pub mod core;
pub mod db;
pub mod sync;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState, build_app};
pub use sync::{ResourceVersions, SyncBus, SyncPayload};
pub use utils::{ApiResponse, AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境：加载 .env、创建工作目录、初始化日志
pub fn setup_environment() -> anyhow::Result<()> {
    // .env 不存在不是错误
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    std::fs::create_dir_all(config.log_dir())?;

    let log_dir = config.log_dir();
    if config.is_production() {
        init_logger_with_file(Some(&config.log_level), log_dir.to_str());
    } else {
        init_logger_with_file(Some(&config.log_level), None);
    }

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____
  / ___/____ __   ______  _____
  \__ \/ __ `/ | / / __ \/ ___/
 ___/ / /_/ /| |/ / /_/ / /
/____/\__,_/ |___/\____/_/
    "#
    );
}
