//! 客户业务服务

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use super::model::{BulkCreateOutcome, Customer, NewCustomer};
use super::repository::CustomerRepository;
use crate::core::error::{CoreError, Result};

#[derive(Clone)]
pub struct CustomerService {
    repo: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self {
        Self { repo }
    }

    /// 创建单个客户：先检查邮箱是否重复，再校验电话格式
    pub async fn create_customer(&self, req: NewCustomer) -> Result<Customer> {
        if self.repo.find_by_email(&req.email).await?.is_some() {
            return Err(CoreError::validation("Email already exists"));
        }
        req.validate()?;

        let customer = self.repo.create(Customer::from_request(req)).await?;
        info!("Created customer: {} ({})", customer.email, customer.id);

        Ok(customer)
    }

    pub async fn get_customer(&self, id: Uuid) -> Result<Customer> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Invalid customer ID"))
    }

    /// 批量创建客户
    ///
    /// 每条记录独立校验（与已有客户或同批次前序记录的邮箱重复、电话格式），
    /// 未通过的记录跳过，并以 `"<email>: <原因>"` 的形式写入返回的 `errors`，
    /// 例如 `"a@example.com: Duplicate email"`、`"a@example.com: Invalid phone format"`。
    /// GraphQL 客户端拿到的 `errors` 列表即为这些字符串。通过校验的记录
    /// 在同一个存储事务中写入，存储层失败时整批不落库并返回错误。
    pub async fn bulk_create_customers(&self, reqs: Vec<NewCustomer>) -> Result<BulkCreateOutcome> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut pending = Vec::with_capacity(reqs.len());
        let mut errors = Vec::new();

        for req in reqs {
            match self.check_bulk_item(&req, &seen).await {
                Ok(()) => {
                    seen.insert(req.email.clone());
                    pending.push(Customer::from_request(req));
                }
                Err(CoreError::Validation(reason)) => {
                    debug!("Skipping bulk item {}: {}", req.email, reason);
                    errors.push(format!("{}: {}", req.email, reason));
                }
                Err(e) => return Err(e),
            }
        }

        let customers = if pending.is_empty() {
            Vec::new()
        } else {
            self.repo.create_many(pending).await?
        };

        info!(
            created = customers.len(),
            rejected = errors.len(),
            "Bulk customer creation finished"
        );

        Ok(BulkCreateOutcome { customers, errors })
    }

    async fn check_bulk_item(&self, req: &NewCustomer, seen: &HashSet<String>) -> Result<()> {
        if seen.contains(&req.email) || self.repo.find_by_email(&req.email).await?.is_some() {
            return Err(CoreError::validation("Duplicate email"));
        }
        req.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::MemoryStore;

    fn service() -> CustomerService {
        CustomerService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_create_and_get_customer() {
        let service = service();
        let created = service
            .create_customer(NewCustomer::new("Ann", "ann@example.com", Some("+15551234567".into())))
            .await
            .unwrap();

        let fetched = service.get_customer(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.phone.as_deref(), Some("+15551234567"));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let service = service();
        service
            .create_customer(NewCustomer::new("Ann", "ann@example.com", None))
            .await
            .unwrap();

        let err = service
            .create_customer(NewCustomer::new("Other Ann", "ann@example.com", None))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref msg) if msg == "Email already exists"));

        service
            .create_customer(NewCustomer::new("Bob", "bob@example.com", None))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_invalid_phone_rejected() {
        let service = service();
        let err = service
            .create_customer(NewCustomer::new("Ann", "ann@example.com", Some("123456".into())))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref msg) if msg == "Invalid phone format"));

        // 校验失败的请求不会落库
        service
            .create_customer(NewCustomer::new("Ann", "ann@example.com", None))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_empty_phone_is_accepted() {
        let service = service();
        let created = service
            .create_customer(NewCustomer::new("Ann", "ann@example.com", Some(String::new())))
            .await
            .unwrap();
        assert_eq!(created.phone, None);

        let outcome = service
            .bulk_create_customers(vec![NewCustomer::new("Bob", "bob@example.com", Some(String::new()))])
            .await
            .unwrap();
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.customers[0].phone, None);
    }

    #[tokio::test]
    async fn test_unknown_customer_is_not_found() {
        let err = service().get_customer(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_bulk_create_partial_success_persists_valid_items() {
        let service = service();
        service
            .create_customer(NewCustomer::new("Existing", "b@example.com", None))
            .await
            .unwrap();

        let outcome = service
            .bulk_create_customers(vec![
                NewCustomer::new("A", "a@example.com", Some("555-123-4567".into())),
                NewCustomer::new("B", "b@example.com", None),
            ])
            .await
            .unwrap();

        assert_eq!(outcome.customers.len(), 1);
        assert_eq!(outcome.errors, vec!["b@example.com: Duplicate email".to_string()]);

        let persisted = service.get_customer(outcome.customers[0].id).await.unwrap();
        assert_eq!(persisted.email, "a@example.com");
    }

    #[tokio::test]
    async fn test_bulk_create_rejects_duplicates_within_batch() {
        let service = service();
        let outcome = service
            .bulk_create_customers(vec![
                NewCustomer::new("A", "a@example.com", None),
                NewCustomer::new("A again", "a@example.com", None),
                NewCustomer::new("C", "c@example.com", Some("abc".into())),
            ])
            .await
            .unwrap();

        assert_eq!(outcome.customers.len(), 1);
        assert_eq!(
            outcome.errors,
            vec![
                "a@example.com: Duplicate email".to_string(),
                "c@example.com: Invalid phone format".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_bulk_create_empty_input() {
        let outcome = service().bulk_create_customers(Vec::new()).await.unwrap();
        assert!(outcome.customers.is_empty());
        assert!(outcome.errors.is_empty());
    }
}
