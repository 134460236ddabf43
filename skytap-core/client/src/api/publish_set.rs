//! 发布集（共享门户）API
//!
//! 新建的发布集默认不授予任何虚拟机访问权限，需要显式调用 [`PublishSetApi::update_access`]。

use reqwest::Method;
use tracing::info;

use crate::client::SkytapClient;
use crate::error::Result;
use crate::models::{PublishSet, PublishSetRequest};

/// 默认的虚拟机访问级别
pub const DEFAULT_ACCESS: &str = "run_and_use";

/// 发布集 API
pub struct PublishSetApi<'a> {
    client: &'a SkytapClient,
}

impl<'a> PublishSetApi<'a> {
    /// 创建新的发布集 API 实例
    pub(crate) fn new(client: &'a SkytapClient) -> Self {
        Self { client }
    }

    /// 创建发布集
    pub async fn create(&self, config_id: &str, req: &PublishSetRequest) -> Result<PublishSet> {
        info!("创建发布集: {} ({})", config_id, req.name);
        self.client
            .request_as(
                Method::POST,
                &format!("/configurations/{}/publish_sets", config_id),
                Some(req),
            )
            .await
    }

    /// 查询环境的发布集列表
    pub async fn list(&self, config_id: &str) -> Result<Vec<PublishSet>> {
        info!("查询发布集列表: {}", config_id);
        self.client
            .request_list(&format!("/configurations/{}/publish_sets", config_id))
            .await
    }

    /// 查询发布集详情
    pub async fn get(&self, publish_set_id: &str) -> Result<serde_json::Value> {
        info!("查询发布集详情: {}", publish_set_id);
        self.client
            .request(
                Method::GET,
                &format!("/publish_sets/{}", publish_set_id),
                None::<()>,
            )
            .await
    }

    /// 设置发布集密码
    pub async fn set_password(
        &self,
        config_id: &str,
        publish_set_id: &str,
        password: &str,
    ) -> Result<serde_json::Value> {
        info!("设置发布集密码: {}/{}", config_id, publish_set_id);
        self.client
            .request(
                Method::PUT,
                &format!("/configurations/{}/publish_sets/{}", config_id, publish_set_id),
                Some(serde_json::json!({ "password": password })),
            )
            .await
    }

    /// 为环境的全部发布集授予所有虚拟机访问权限
    ///
    /// 每个发布集一次更新请求，请求体一次携带全部虚拟机授权。
    pub async fn update_access(&self, config_id: &str, access: &str) -> Result<Vec<serde_json::Value>> {
        let vms = self.client.vms().list(config_id).await?;
        let grants: Vec<serde_json::Value> = vms
            .iter()
            .map(|vm| {
                serde_json::json!({
                    "vm_ref": self.client.vm_ref(&vm.id),
                    "access": access,
                })
            })
            .collect();
        let body = serde_json::json!({ "vms": grants });

        let portals = self.list(config_id).await?;
        info!(
            "更新发布集访问权限: {} ({} 个发布集, {} 台虚拟机, {})",
            config_id,
            portals.len(),
            vms.len(),
            access
        );

        let mut results = Vec::with_capacity(portals.len());
        for portal in &portals {
            let result = self
                .client
                .request(
                    Method::PUT,
                    &format!("/configurations/{}/publish_sets/{}", config_id, portal.id),
                    Some(&body),
                )
                .await?;
            results.push(result);
        }
        Ok(results)
    }
}
