//! 部门管理 API

use reqwest::Method;
use tracing::info;

use crate::client::SkytapClient;
use crate::error::Result;

/// 部门管理 API
pub struct DepartmentApi<'a> {
    client: &'a SkytapClient,
}

impl<'a> DepartmentApi<'a> {
    /// 创建新的部门 API 实例
    pub(crate) fn new(client: &'a SkytapClient) -> Self {
        Self { client }
    }

    /// 查询部门列表
    pub async fn list(&self) -> Result<serde_json::Value> {
        info!("查询部门列表");
        self.client
            .request(Method::GET, "/departments", None::<()>)
            .await
    }

    /// 查询部门详情
    pub async fn get(&self, department_id: &str) -> Result<serde_json::Value> {
        info!("查询部门详情: {}", department_id);
        self.client
            .request(
                Method::GET,
                &format!("/departments/{}", department_id),
                None::<()>,
            )
            .await
    }

    /// 创建部门
    pub async fn create(&self, name: &str, description: &str) -> Result<serde_json::Value> {
        info!("创建部门: {}", name);
        self.client
            .request(
                Method::POST,
                "/departments",
                Some(serde_json::json!({ "name": name, "description": description })),
            )
            .await
    }

    /// 查询部门配额
    pub async fn quotas(&self, department_id: &str) -> Result<serde_json::Value> {
        info!("查询部门配额: {}", department_id);
        self.client
            .request(
                Method::GET,
                &format!("/departments/{}/quotas", department_id),
                None::<()>,
            )
            .await
    }
}
