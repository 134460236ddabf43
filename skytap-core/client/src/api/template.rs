//! 模板管理 API
//!
//! 模板只读，作为环境创建的来源。

use reqwest::Method;
use tracing::info;

use crate::client::SkytapClient;
use crate::error::Result;

/// 模板管理 API
pub struct TemplateApi<'a> {
    client: &'a SkytapClient,
}

impl<'a> TemplateApi<'a> {
    /// 创建新的模板 API 实例
    pub(crate) fn new(client: &'a SkytapClient) -> Self {
        Self { client }
    }

    /// 查询模板列表
    pub async fn list(&self) -> Result<serde_json::Value> {
        info!("查询模板列表");
        self.client
            .request(Method::GET, "/templates", None::<()>)
            .await
    }

    /// 查询模板详情
    pub async fn get(&self, template_id: &str) -> Result<serde_json::Value> {
        info!("查询模板详情: {}", template_id);
        self.client
            .request(Method::GET, &format!("/templates/{}", template_id), None::<()>)
            .await
    }

    /// 将环境保存为模板
    ///
    /// # Arguments
    /// * `network_option` - 网络保存方式，如 `none`
    /// * `name` - 模板名称
    pub async fn create_from_configuration(
        &self,
        config_id: &str,
        vm_ids: &[String],
        network_option: &str,
        name: &str,
    ) -> Result<serde_json::Value> {
        info!("将环境保存为模板: {} -> {}", config_id, name);
        self.client
            .request(
                Method::POST,
                "/templates",
                Some(serde_json::json!({
                    "configuration_id": config_id,
                    "vm_ids": vm_ids,
                    "network_option": network_option,
                    "template_name": name,
                })),
            )
            .await
    }

    /// 删除模板
    pub async fn delete(&self, template_id: &str) -> Result<serde_json::Value> {
        info!("删除模板: {}", template_id);
        self.client
            .request(Method::DELETE, &format!("/templates/{}", template_id), None::<()>)
            .await
    }
}
