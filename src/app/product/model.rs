//! 产品数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn from_request(req: NewProduct) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: req.name,
            price: req.price,
            stock: req.stock,
            created_at: Utc::now(),
        }
    }
}

/// 创建产品请求
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewProduct {
    pub name: String,

    #[validate(range(exclusive_min = 0.0, message = "Price must be positive"))]
    pub price: f64,

    #[serde(default)]
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: f64, stock: i32) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
        }
    }
}
