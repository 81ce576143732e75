//! 基础设施层：存储后端、数据库连接池、日志

#[cfg(feature = "database")]
pub mod database;
pub mod logger;
pub mod memory;
#[cfg(feature = "database")]
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::app::customer::repository::CustomerRepository;
use crate::app::order::repository::OrderRepository;
use crate::app::product::repository::ProductRepository;
use crate::config::{StorageBackend, StorageConfig};
use crate::core::error::{CoreError, Result};

/// 存储连通性探测，供健康检查使用
#[async_trait]
pub trait StorageHealth: Send + Sync + 'static {
    async fn ping(&self) -> Result<()>;

    fn backend(&self) -> &'static str;
}

/// 三个实体仓储与健康探测的集合
#[derive(Clone)]
pub struct Repositories {
    pub customers: Arc<dyn CustomerRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub health: Arc<dyn StorageHealth>,
}

impl Repositories {
    /// 由同一个存储对象提供全部仓储
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: CustomerRepository + ProductRepository + OrderRepository + StorageHealth,
    {
        Self {
            customers: store.clone(),
            products: store.clone(),
            orders: store.clone(),
            health: store,
        }
    }

    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(memory::MemoryStore::new()))
    }

    /// 按配置连接存储后端
    pub async fn connect(config: &StorageConfig) -> Result<Self> {
        match config.backend {
            StorageBackend::Memory => {
                info!("Using in-memory storage");
                Ok(Self::in_memory())
            }
            #[cfg(feature = "database")]
            StorageBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| CoreError::Internal("storage.database_url is not set".into()))?;
                let manager = database::DatabaseManager::new(url, config).await?;
                manager.migrate().await?;
                Ok(Self::from_store(Arc::new(postgres::PgStore::new(
                    manager.get_pool().clone(),
                ))))
            }
            #[cfg(not(feature = "database"))]
            StorageBackend::Postgres => Err(CoreError::Internal(
                "postgres backend requires the `database` feature".into(),
            )),
        }
    }
}
