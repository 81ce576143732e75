//! GraphQL 对象、输入与返回类型

use async_graphql::{InputObject, SimpleObject, ID};
use chrono::{DateTime, Utc};

use crate::app::customer::model::{BulkCreateOutcome, Customer, NewCustomer};
use crate::app::order::model::OrderDetails;
use crate::app::product::model::Product;

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Customer")]
pub struct CustomerType {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerType {
    fn from(c: Customer) -> Self {
        Self {
            id: ID(c.id.to_string()),
            name: c.name,
            email: c.email,
            phone: c.phone,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Product")]
pub struct ProductType {
    pub id: ID,
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductType {
    fn from(p: Product) -> Self {
        Self {
            id: ID(p.id.to_string()),
            name: p.name,
            price: p.price,
            stock: p.stock,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Order")]
pub struct OrderType {
    pub id: ID,
    pub customer: CustomerType,
    pub products: Vec<ProductType>,
    pub total_amount: f64,
    pub created_at: DateTime<Utc>,
}

impl From<OrderDetails> for OrderType {
    fn from(details: OrderDetails) -> Self {
        Self {
            id: ID(details.order.id.to_string()),
            customer: details.customer.into(),
            products: details.products.into_iter().map(Into::into).collect(),
            total_amount: details.order.total_amount,
            created_at: details.order.created_at,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
#[graphql(name = "CustomerInput")]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<CustomerInput> for NewCustomer {
    fn from(input: CustomerInput) -> Self {
        NewCustomer::new(input.name, input.email, input.phone)
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct CreateCustomerPayload {
    pub customer: CustomerType,
    pub message: String,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct BulkCreateCustomersPayload {
    pub customers: Vec<CustomerType>,
    pub errors: Vec<String>,
}

impl From<BulkCreateOutcome> for BulkCreateCustomersPayload {
    fn from(outcome: BulkCreateOutcome) -> Self {
        Self {
            customers: outcome.customers.into_iter().map(Into::into).collect(),
            errors: outcome.errors,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct CreateProductPayload {
    pub product: ProductType,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct CreateOrderPayload {
    pub order: OrderType,
}
