//! PostgreSQL 仓储实现

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use tracing::info;
use uuid::Uuid;

use super::StorageHealth;
use crate::app::customer::model::Customer;
use crate::app::customer::repository::CustomerRepository;
use crate::app::order::model::Order;
use crate::app::order::repository::OrderRepository;
use crate::app::product::model::Product;
use crate::app::product::repository::ProductRepository;
use crate::core::error::Result;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_order_products(&self, order_ids: &[Uuid]) -> Result<Vec<(Uuid, Uuid)>> {
        let rows: Vec<(Uuid, Uuid)> = sqlx::query_as(
            "SELECT order_id, product_id FROM order_products WHERE order_id = ANY($1) ORDER BY order_id, position",
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    customer_id: Uuid,
    total_amount: f64,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, links: &[(Uuid, Uuid)]) -> Order {
        Order {
            product_ids: links
                .iter()
                .filter(|(order_id, _)| *order_id == self.id)
                .map(|(_, product_id)| *product_id)
                .collect(),
            id: self.id,
            customer_id: self.customer_id,
            total_amount: self.total_amount,
            created_at: self.created_at,
        }
    }
}

const INSERT_CUSTOMER: &str =
    "INSERT INTO customers (id, name, email, phone, created_at) VALUES ($1, $2, $3, $4, $5) RETURNING *";

#[async_trait]
impl CustomerRepository for PgStore {
    async fn create(&self, customer: Customer) -> Result<Customer> {
        let customer = sqlx::query_as::<_, Customer>(INSERT_CUSTOMER)
            .bind(customer.id)
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.phone)
            .bind(customer.created_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(customer)
    }

    async fn create_many(&self, customers: Vec<Customer>) -> Result<Vec<Customer>> {
        // 任一插入失败时 tx 被 drop，自动回滚
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(customers.len());

        for customer in customers {
            let row = sqlx::query_as::<_, Customer>(INSERT_CUSTOMER)
                .bind(customer.id)
                .bind(&customer.name)
                .bind(&customer.email)
                .bind(&customer.phone)
                .bind(customer.created_at)
                .fetch_one(&mut *tx)
                .await?;
            created.push(row);
        }

        tx.commit().await?;
        info!("Committed {} customers in one transaction", created.len());
        Ok(created)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(customer)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(customer)
    }

    async fn filter_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(customers)
    }
}

#[async_trait]
impl ProductRepository for PgStore {
    async fn create(&self, product: Product) -> Result<Product> {
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (id, name, price, stock, created_at) VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.stock)
        .bind(product.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn filter_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }
}

#[async_trait]
impl OrderRepository for PgStore {
    async fn create(&self, order: Order) -> Result<Order> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO orders (id, customer_id, total_amount, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(order.id)
        .bind(order.customer_id)
        .bind(order.total_amount)
        .bind(order.created_at)
        .execute(&mut *tx)
        .await?;

        for (position, product_id) in order.product_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO order_products (order_id, product_id, position) VALUES ($1, $2, $3)",
            )
            .bind(order.id)
            .bind(product_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(order)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT id, customer_id, total_amount, created_at FROM orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let links = self.load_order_products(&[row.id]).await?;
                Ok(Some(row.into_order(&links)))
            }
            None => Ok(None),
        }
    }

    async fn filter_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT id, customer_id, total_amount, created_at FROM orders WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let found: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let links = self.load_order_products(&found).await?;
        Ok(rows.into_iter().map(|row| row.into_order(&links)).collect())
    }
}

#[async_trait]
impl StorageHealth for PgStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

// 需要真实数据库：DATABASE_URL=postgres://... cargo test -- --ignored
#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::customer::model::NewCustomer;
    use crate::app::product::model::NewProduct;
    use crate::config::StorageConfig;
    use crate::core::error::CoreError;
    use crate::infrastructure::database::DatabaseManager;

    async fn test_store() -> PgStore {
        let database_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must point at a test database");
        let db = DatabaseManager::new(&database_url, &StorageConfig::default())
            .await
            .expect("Failed to connect to test database");
        db.migrate().await.expect("Failed to create tables");
        PgStore::new(db.get_pool().clone())
    }

    /// 每次运行使用不同邮箱，避免与历史数据冲突
    fn customer(tag: &str) -> Customer {
        let email = format!("{tag}-{}@example.com", Uuid::new_v4());
        Customer::from_request(NewCustomer::new("Test", email, None))
    }

    #[tokio::test]
    #[ignore]
    async fn test_unique_violation_maps_to_validation() {
        let store = test_store().await;
        let first = customer("dup");
        CustomerRepository::create(&store, first.clone()).await.unwrap();

        let mut second = customer("dup");
        second.email = first.email.clone();
        let err = CustomerRepository::create(&store, second).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref msg) if msg == "Email already exists"));
    }

    #[tokio::test]
    #[ignore]
    async fn test_create_many_rolls_back_on_failure() {
        let store = test_store().await;
        let taken = CustomerRepository::create(&store, customer("taken")).await.unwrap();

        let fresh = customer("fresh");
        let mut clash = customer("clash");
        clash.email = taken.email.clone();

        let err = store
            .create_many(vec![fresh.clone(), clash])
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(store.find_by_email(&fresh.email).await.unwrap().is_none());
        assert!(CustomerRepository::get(&store, fresh.id).await.unwrap().is_none());

        let created = store.create_many(vec![fresh.clone()]).await.unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].email, fresh.email);
    }

    #[tokio::test]
    #[ignore]
    async fn test_order_round_trips_products_in_order() {
        let store = test_store().await;
        let buyer = CustomerRepository::create(&store, customer("buyer")).await.unwrap();
        let first = ProductRepository::create(&store, Product::from_request(NewProduct::new("A", 10.0, 1)))
            .await
            .unwrap();
        let second = ProductRepository::create(&store, Product::from_request(NewProduct::new("B", 5.5, 2)))
            .await
            .unwrap();

        let order = Order::place(&buyer, &[second.clone(), first.clone()]);
        OrderRepository::create(&store, order.clone()).await.unwrap();

        let fetched = OrderRepository::get(&store, order.id).await.unwrap().unwrap();
        assert_eq!(fetched.customer_id, buyer.id);
        assert_eq!(fetched.product_ids, vec![second.id, first.id]);
        assert_eq!(fetched.total_amount, 15.5);

        let listed = OrderRepository::filter_by_ids(&store, &[order.id]).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].product_ids, fetched.product_ids);
    }
}
