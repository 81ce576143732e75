//! 客户数据模型

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use uuid::Uuid;
use validator::Validate;

/// 国际格式 `+` 加 10–15 位数字，或 `DDD-DDD-DDDD`
pub static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+\d{10,15}|\d{3}-\d{3}-\d{4})$").expect("phone pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// 由已校验的请求生成新客户记录（分配 id 与创建时间）
    pub fn from_request(req: NewCustomer) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: req.name,
            email: req.email,
            phone: req.phone,
            created_at: Utc::now(),
        }
    }
}

/// 创建客户请求
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCustomer {
    pub name: String,

    pub email: String,

    #[validate(regex(path = *PHONE_RE, message = "Invalid phone format"))]
    pub phone: Option<String>,
}

impl NewCustomer {
    /// 空字符串电话视为未提供
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: Option<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.filter(|p| !p.is_empty()),
        }
    }
}

/// 批量创建结果：成功写入的客户与逐条错误信息
#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkCreateOutcome {
    pub customers: Vec<Customer>,
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_phone(phone: &str) -> NewCustomer {
        NewCustomer::new("Ann", "ann@example.com", Some(phone.to_string()))
    }

    #[test]
    fn test_phone_formats_accepted() {
        assert!(with_phone("+15551234567").validate().is_ok());
        assert!(with_phone("555-123-4567").validate().is_ok());
        assert!(with_phone("+123456789012345").validate().is_ok());
    }

    #[test]
    fn test_phone_formats_rejected() {
        for phone in ["abc", "123456", "+123456789", "+1234567890123456", "555-1234-567", "5551234567"] {
            assert!(with_phone(phone).validate().is_err(), "{phone} should be rejected");
        }
    }

    #[test]
    fn test_missing_phone_is_valid() {
        let req = NewCustomer::new("Ann", "ann@example.com", None);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_phone_is_treated_as_missing() {
        let req = with_phone("");
        assert_eq!(req.phone, None);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_from_request_assigns_identity() {
        let a = Customer::from_request(NewCustomer::new("A", "a@example.com", None));
        let b = Customer::from_request(NewCustomer::new("B", "b@example.com", None));
        assert_ne!(a.id, b.id);
        assert_eq!(a.email, "a@example.com");
    }
}
