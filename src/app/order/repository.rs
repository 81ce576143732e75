//! 订单仓储接口

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Order;
use crate::core::error::Result;

#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    /// 订单行与产品关联在同一个存储事务中写入
    async fn create(&self, order: Order) -> Result<Order>;

    async fn get(&self, id: Uuid) -> Result<Option<Order>>;

    async fn filter_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Order>>;
}
