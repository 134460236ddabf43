//! 项目管理 API
//!
//! 项目在会话工作流中作为一组环境的逻辑分组。

use reqwest::Method;
use tracing::info;

use crate::client::SkytapClient;
use crate::error::Result;
use crate::models::{Configuration, Project};

/// 项目管理 API
pub struct ProjectApi<'a> {
    client: &'a SkytapClient,
}

impl<'a> ProjectApi<'a> {
    /// 创建新的项目 API 实例
    pub(crate) fn new(client: &'a SkytapClient) -> Self {
        Self { client }
    }

    /// 查询项目列表
    pub async fn list(&self) -> Result<Vec<Project>> {
        info!("查询项目列表");
        self.client.request_list("/projects").await
    }

    /// 查询项目详情
    pub async fn get(&self, project_id: &str) -> Result<Project> {
        info!("查询项目详情: {}", project_id);
        self.client
            .request_as(Method::GET, &format!("/projects/{}", project_id), None::<()>)
            .await
    }

    /// 创建项目
    pub async fn create(&self, name: &str, summary: &str) -> Result<Project> {
        info!("创建项目: {}", name);
        self.client
            .request_as(
                Method::POST,
                "/projects",
                Some(serde_json::json!({ "name": name, "summary": summary })),
            )
            .await
    }

    /// 删除项目
    ///
    /// 项目下的环境需先删除。
    pub async fn delete(&self, project_id: &str) -> Result<serde_json::Value> {
        info!("删除项目: {}", project_id);
        self.client
            .request(Method::DELETE, &format!("/projects/{}", project_id), None::<()>)
            .await
    }

    /// 将环境加入项目
    pub async fn add_configuration(
        &self,
        project_id: &str,
        config_id: &str,
    ) -> Result<serde_json::Value> {
        info!("将环境加入项目: {} -> {}", config_id, project_id);
        self.client
            .request(
                Method::POST,
                &format!("/projects/{}/configurations/{}", project_id, config_id),
                None::<()>,
            )
            .await
    }

    /// 将模板加入项目
    pub async fn add_template(&self, project_id: &str, template_id: &str) -> Result<serde_json::Value> {
        info!("将模板加入项目: {} -> {}", template_id, project_id);
        self.client
            .request(
                Method::POST,
                &format!("/projects/{}/templates/{}", project_id, template_id),
                None::<()>,
            )
            .await
    }

    /// 查询项目下的环境
    pub async fn list_configurations(&self, project_id: &str) -> Result<Vec<Configuration>> {
        info!("查询项目环境列表: {}", project_id);
        self.client
            .request_list(&format!("/projects/{}/configurations", project_id))
            .await
    }

    /// 将用户加入项目
    ///
    /// # Arguments
    /// * `role` - 项目角色，如 `participant`、`editor`、`manager`
    pub async fn add_user(
        &self,
        project_id: &str,
        user_id: &str,
        role: &str,
    ) -> Result<serde_json::Value> {
        info!("将用户加入项目: {} -> {} ({})", user_id, project_id, role);
        self.client
            .request(
                Method::POST,
                &format!("/projects/{}/users/{}", project_id, user_id),
                Some(serde_json::json!({ "role": role })),
            )
            .await
    }
}
