//! 内存存储：开发与测试使用的仓储实现

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::StorageHealth;
use crate::app::customer::model::Customer;
use crate::app::customer::repository::CustomerRepository;
use crate::app::order::model::Order;
use crate::app::order::repository::OrderRepository;
use crate::app::product::model::Product;
use crate::app::product::repository::ProductRepository;
use crate::core::error::{CoreError, Result};

#[derive(Default)]
struct Tables {
    customers: HashMap<Uuid, Customer>,
    customer_emails: HashMap<String, Uuid>,
    products: HashMap<Uuid, Product>,
    orders: HashMap<Uuid, Order>,
}

impl Tables {
    /// 模拟 customers.email 的唯一约束
    fn insert_customer(&mut self, customer: Customer) -> Result<Customer> {
        if self.customer_emails.contains_key(&customer.email) {
            return Err(CoreError::validation("Email already exists"));
        }
        self.customer_emails.insert(customer.email.clone(), customer.id);
        self.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }
}

/// 所有写操作在一把写锁内完成，等价于串行化事务
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn pick<T: Clone>(table: &HashMap<Uuid, T>, ids: &[Uuid]) -> Vec<T> {
    let unique: HashSet<&Uuid> = ids.iter().collect();
    unique.into_iter().filter_map(|id| table.get(id).cloned()).collect()
}

#[async_trait]
impl CustomerRepository for MemoryStore {
    async fn create(&self, customer: Customer) -> Result<Customer> {
        self.tables.write().insert_customer(customer)
    }

    async fn create_many(&self, customers: Vec<Customer>) -> Result<Vec<Customer>> {
        let mut tables = self.tables.write();

        // 先整体检查再写入，保证全部成功或全部不写
        {
            let mut batch = HashSet::new();
            for customer in &customers {
                if tables.customer_emails.contains_key(&customer.email)
                    || !batch.insert(customer.email.as_str())
                {
                    return Err(CoreError::validation("Email already exists"));
                }
            }
        }

        customers
            .into_iter()
            .map(|customer| tables.insert_customer(customer))
            .collect()
    }

    async fn get(&self, id: Uuid) -> Result<Option<Customer>> {
        Ok(self.tables.read().customers.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>> {
        let tables = self.tables.read();
        Ok(tables
            .customer_emails
            .get(email)
            .and_then(|id| tables.customers.get(id))
            .cloned())
    }

    async fn filter_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Customer>> {
        Ok(pick(&self.tables.read().customers, ids))
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn create(&self, product: Product) -> Result<Product> {
        self.tables.write().products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>> {
        Ok(self.tables.read().products.get(&id).cloned())
    }

    async fn filter_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>> {
        Ok(pick(&self.tables.read().products, ids))
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn create(&self, order: Order) -> Result<Order> {
        let mut tables = self.tables.write();

        if !tables.customers.contains_key(&order.customer_id) {
            return Err(CoreError::not_found("Invalid customer ID"));
        }
        if order.product_ids.iter().any(|id| !tables.products.contains_key(id)) {
            return Err(CoreError::not_found("Invalid product ID"));
        }

        tables.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Order>> {
        Ok(self.tables.read().orders.get(&id).cloned())
    }

    async fn filter_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Order>> {
        Ok(pick(&self.tables.read().orders, ids))
    }
}

#[async_trait]
impl StorageHealth for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
