//! 产品仓储接口

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Product;
use crate::core::error::Result;

#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    async fn create(&self, product: Product) -> Result<Product>;

    async fn get(&self, id: Uuid) -> Result<Option<Product>>;

    /// 按 id 集合查询，返回找到的产品（去重，不保证顺序与入参一致）
    async fn filter_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>>;
}
