//! 产品业务服务

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::model::{NewProduct, Product};
use super::repository::ProductRepository;
use crate::core::error::{CoreError, Result};

#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_product(&self, req: NewProduct) -> Result<Product> {
        if !req.price.is_finite() {
            return Err(CoreError::validation("Price must be positive"));
        }
        req.validate()?;

        let product = self.repo.create(Product::from_request(req)).await?;
        info!(
            "Created product: {} ({}) price={} stock={}",
            product.name, product.id, product.price, product.stock
        );

        Ok(product)
    }

    pub async fn get_product(&self, id: Uuid) -> Result<Product> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Invalid product ID"))
    }
}
