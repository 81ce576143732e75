//! GraphQL schema 构建

use async_graphql::{EmptySubscription, Schema};

use super::mutation::MutationRoot;
use super::query::QueryRoot;
use crate::app::customer::service::CustomerService;
use crate::app::order::service::OrderService;
use crate::app::product::service::ProductService;
use crate::infrastructure::Repositories;

pub type CrmSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// 注入到 GraphQL 上下文中的业务服务
#[derive(Clone)]
pub struct Services {
    pub customers: CustomerService,
    pub products: ProductService,
    pub orders: OrderService,
}

impl Services {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            customers: CustomerService::new(repos.customers.clone()),
            products: ProductService::new(repos.products.clone()),
            orders: OrderService::new(
                repos.orders.clone(),
                repos.customers.clone(),
                repos.products.clone(),
            ),
        }
    }
}

pub fn build_schema(services: Services) -> CrmSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(services)
        .finish()
}
