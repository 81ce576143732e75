//! 应用层：按实体划分的模型、仓储接口与业务服务

pub mod customer;
pub mod order;
pub mod product;
