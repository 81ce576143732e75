//! 订单数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::customer::model::Customer;
use crate::app::product::model::Product;

/// 订单记录，`total_amount` 在创建时计算一次并持久化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub product_ids: Vec<Uuid>,
    pub total_amount: f64,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn place(customer: &Customer, products: &[Product]) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_id: customer.id,
            product_ids: products.iter().map(|p| p.id).collect(),
            total_amount: total_amount(products),
            created_at: Utc::now(),
        }
    }
}

pub fn total_amount(products: &[Product]) -> f64 {
    products.iter().map(|p| p.price).sum()
}

/// 创建订单请求，id 保持调用方传入的原始字符串
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrder {
    pub customer_id: String,
    pub product_ids: Vec<String>,
}

/// 订单及其关联的客户与产品
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetails {
    pub order: Order,
    pub customer: Customer,
    pub products: Vec<Product>,
}
