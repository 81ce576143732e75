//! # CRM GraphQL 变更服务
//!
//! 在关系型存储之上提供客户、产品、订单的 GraphQL 变更层：
//! - 创建客户（邮箱唯一、电话格式校验）
//! - 批量创建客户（逐条校验，通过的记录在同一事务中写入）
//! - 创建产品（价格为正、库存非负）
//! - 创建订单（总价在创建时计算并持久化）

pub mod app;
pub mod config;
pub mod core;
pub mod graphql;
pub mod infrastructure;
pub mod server;

pub use crate::core::error::{CoreError, Result};
