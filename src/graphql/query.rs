use async_graphql::Object;

/// GraphQL 要求对象类型至少有一个字段，查询根只暴露服务版本
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// 服务版本号
    async fn api_version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}
