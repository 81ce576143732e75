//! GraphQL 变更根：按操作名分发到各业务服务

use async_graphql::{Context, Object, ResultExt, ID};

use super::schema::Services;
use super::types::{
    BulkCreateCustomersPayload, CreateCustomerPayload, CreateOrderPayload, CreateProductPayload,
    CustomerInput,
};
use crate::app::customer::model::NewCustomer;
use crate::app::order::model::NewOrder;
use crate::app::product::model::NewProduct;

#[derive(Debug, Clone, Copy, Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// 创建客户，邮箱必须唯一
    async fn create_customer(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
        phone: Option<String>,
    ) -> async_graphql::Result<CreateCustomerPayload> {
        let services = ctx.data::<Services>()?;
        let customer = services
            .customers
            .create_customer(NewCustomer::new(name, email, phone))
            .await
            .extend()?;

        Ok(CreateCustomerPayload {
            customer: customer.into(),
            message: "Customer created successfully".to_string(),
        })
    }

    /// 批量创建客户，未通过校验的条目记录在 `errors` 中
    async fn bulk_create_customers(
        &self,
        ctx: &Context<'_>,
        input: Vec<CustomerInput>,
    ) -> async_graphql::Result<BulkCreateCustomersPayload> {
        let services = ctx.data::<Services>()?;
        let outcome = services
            .customers
            .bulk_create_customers(input.into_iter().map(Into::into).collect())
            .await
            .extend()?;

        Ok(outcome.into())
    }

    /// 创建产品，未提供或为 null 的库存按 0 处理
    async fn create_product(
        &self,
        ctx: &Context<'_>,
        name: String,
        price: f64,
        stock: Option<i32>,
    ) -> async_graphql::Result<CreateProductPayload> {
        let services = ctx.data::<Services>()?;
        let product = services
            .products
            .create_product(NewProduct::new(name, price, stock.unwrap_or(0)))
            .await
            .extend()?;

        Ok(CreateProductPayload {
            product: product.into(),
        })
    }

    /// 创建订单，总价为所选产品价格之和
    async fn create_order(
        &self,
        ctx: &Context<'_>,
        customer_id: ID,
        product_ids: Vec<ID>,
    ) -> async_graphql::Result<CreateOrderPayload> {
        let services = ctx.data::<Services>()?;
        let details = services
            .orders
            .create_order(NewOrder {
                customer_id: customer_id.0,
                product_ids: product_ids.into_iter().map(|id| id.0).collect(),
            })
            .await
            .extend()?;

        Ok(CreateOrderPayload {
            order: details.into(),
        })
    }
}
