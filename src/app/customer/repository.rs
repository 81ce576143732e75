//! 客户仓储接口

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Customer;
use crate::core::error::Result;

#[async_trait]
pub trait CustomerRepository: Send + Sync + 'static {
    async fn create(&self, customer: Customer) -> Result<Customer>;

    /// 在同一个存储事务中写入全部记录，任一失败则全部回滚
    async fn create_many(&self, customers: Vec<Customer>) -> Result<Vec<Customer>>;

    async fn get(&self, id: Uuid) -> Result<Option<Customer>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>>;

    async fn filter_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Customer>>;
}
