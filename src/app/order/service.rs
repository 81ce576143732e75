//! 订单业务服务

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::model::{NewOrder, Order, OrderDetails};
use super::repository::OrderRepository;
use crate::app::customer::repository::CustomerRepository;
use crate::app::product::model::Product;
use crate::app::product::repository::ProductRepository;
use crate::core::error::{CoreError, Result};

#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    customers: Arc<dyn CustomerRepository>,
    products: Arc<dyn ProductRepository>,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        customers: Arc<dyn CustomerRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            orders,
            customers,
            products,
        }
    }

    /// 创建订单
    ///
    /// 产品存在性通过"查到的数量是否等于请求的数量"判断，重复的产品 id
    /// 同样视为无效。
    pub async fn create_order(&self, req: NewOrder) -> Result<OrderDetails> {
        if req.product_ids.is_empty() {
            return Err(CoreError::validation("At least one product is required"));
        }

        let customer = match Uuid::parse_str(&req.customer_id) {
            Ok(id) => self.customers.get(id).await?,
            Err(_) => None,
        }
        .ok_or_else(|| CoreError::not_found("Invalid customer ID"))?;

        // 无法解析的 id 不可能命中任何产品，直接按数量不符处理
        let product_ids = req
            .product_ids
            .iter()
            .map(|raw| Uuid::parse_str(raw))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| CoreError::not_found("Invalid product ID"))?;

        let mut products = self.products.filter_by_ids(&product_ids).await?;
        if products.len() != product_ids.len() {
            return Err(CoreError::not_found("Invalid product ID"));
        }
        sort_by_request(&mut products, &product_ids);

        let order = self.orders.create(Order::place(&customer, &products)).await?;
        info!(
            "Created order: {} for customer {} ({} products, total {:.2})",
            order.id,
            customer.id,
            products.len(),
            order.total_amount
        );

        Ok(OrderDetails {
            order,
            customer,
            products,
        })
    }

    pub async fn get_order(&self, id: Uuid) -> Result<OrderDetails> {
        let order = self
            .orders
            .get(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Invalid order ID"))?;
        let customer = self
            .customers
            .get(order.customer_id)
            .await?
            .ok_or_else(|| CoreError::Internal(format!("order {} has no customer", order.id)))?;
        let mut products = self.products.filter_by_ids(&order.product_ids).await?;
        sort_by_request(&mut products, &order.product_ids);

        Ok(OrderDetails {
            order,
            customer,
            products,
        })
    }
}

fn sort_by_request(products: &mut [Product], ids: &[Uuid]) {
    products.sort_by_key(|p| ids.iter().position(|id| *id == p.id).unwrap_or(usize::MAX));
}
