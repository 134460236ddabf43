//! 用户组管理 API

use reqwest::Method;
use tracing::info;

use crate::client::SkytapClient;
use crate::error::Result;

/// 用户组管理 API
pub struct GroupApi<'a> {
    client: &'a SkytapClient,
}

impl<'a> GroupApi<'a> {
    /// 创建新的用户组 API 实例
    pub(crate) fn new(client: &'a SkytapClient) -> Self {
        Self { client }
    }

    /// 创建用户组
    pub async fn create(&self, name: &str, description: &str) -> Result<serde_json::Value> {
        info!("创建用户组: {}", name);
        self.client
            .request(
                Method::POST,
                "/groups",
                Some(serde_json::json!({ "name": name, "description": description })),
            )
            .await
    }

    /// 将用户加入用户组
    pub async fn add_user(&self, group_id: &str, user_id: &str) -> Result<serde_json::Value> {
        info!("将用户加入用户组: {} -> {}", user_id, group_id);
        self.client
            .request(
                Method::POST,
                &format!("/groups/{}/users/{}", group_id, user_id),
                Some(serde_json::json!({})),
            )
            .await
    }
}
