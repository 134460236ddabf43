//! 用户管理 API

use reqwest::Method;
use tracing::info;

use crate::client::SkytapClient;
use crate::error::Result;
use crate::models::NewUser;

/// 用户管理 API
pub struct UserApi<'a> {
    client: &'a SkytapClient,
}

impl<'a> UserApi<'a> {
    /// 创建新的用户 API 实例
    pub(crate) fn new(client: &'a SkytapClient) -> Self {
        Self { client }
    }

    /// 查询用户列表
    pub async fn list(&self) -> Result<serde_json::Value> {
        info!("查询用户列表");
        self.client
            .request(Method::GET, "/users", None::<()>)
            .await
    }

    /// 查询用户详情
    pub async fn get(&self, user_id: &str) -> Result<serde_json::Value> {
        info!("查询用户详情: {}", user_id);
        self.client
            .request(Method::GET, &format!("/users/{}", user_id), None::<()>)
            .await
    }

    /// 创建用户
    ///
    /// # Example
    /// ```ignore
    /// let user = NewUser::new("jdoe", "John", "Doe", "jdoe@example.com")
    ///     .with_region("EMEA");
    /// client.users().create(&user).await?;
    /// ```
    pub async fn create(&self, user: &NewUser) -> Result<serde_json::Value> {
        info!("创建用户: {} ({})", user.login_name, user.account_role);
        self.client
            .request(Method::POST, "/users", Some(user))
            .await
    }
}
