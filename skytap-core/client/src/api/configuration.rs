//! 环境（configuration）管理 API
//!
//! 提供环境管理功能，包括：
//! - 基本操作：查询、从模板创建、复制、删除
//! - 配置修改：重命名、自动挂起、电源选项、用户数据
//! - 运行状态切换

use reqwest::Method;
use tracing::info;

use crate::client::SkytapClient;
use crate::error::Result;
use crate::models::{Configuration, Runstate};

/// 环境管理 API
pub struct ConfigurationApi<'a> {
    client: &'a SkytapClient,
}

impl<'a> ConfigurationApi<'a> {
    /// 创建新的环境 API 实例
    pub(crate) fn new(client: &'a SkytapClient) -> Self {
        Self { client }
    }

    /// 查询环境列表
    pub async fn list(&self) -> Result<Vec<Configuration>> {
        info!("查询环境列表");
        self.client.request_list("/configurations").await
    }

    /// 查询环境详情
    pub async fn get(&self, config_id: &str) -> Result<Configuration> {
        info!("查询环境详情: {}", config_id);
        self.client
            .request_as(
                Method::GET,
                &format!("/configurations/{}", config_id),
                None::<()>,
            )
            .await
    }

    /// 从模板创建环境
    pub async fn create_from_template(&self, template_id: &str) -> Result<Configuration> {
        info!("从模板创建环境: {}", template_id);
        self.client
            .request_as(
                Method::POST,
                "/configurations",
                Some(serde_json::json!({ "template_id": template_id })),
            )
            .await
    }

    /// 复制环境
    ///
    /// # Arguments
    /// * `vm_ids` - 只复制指定的虚拟机，为空时复制全部
    pub async fn copy(&self, config_id: &str, vm_ids: &[String]) -> Result<Configuration> {
        info!("复制环境: {} (虚拟机: {} 个)", config_id, vm_ids.len());
        let mut body = serde_json::json!({ "configuration_id": config_id });
        if !vm_ids.is_empty() {
            body["vm_ids"] = serde_json::json!(vm_ids);
        }
        self.client
            .request_as(Method::POST, "/configurations", Some(body))
            .await
    }

    /// 修改环境属性
    pub async fn edit(&self, config_id: &str, attributes: serde_json::Value) -> Result<serde_json::Value> {
        info!("修改环境属性: {}", config_id);
        self.client
            .request(
                Method::PUT,
                &format!("/configurations/{}", config_id),
                Some(attributes),
            )
            .await
    }

    /// 重命名环境
    pub async fn rename(&self, config_id: &str, new_name: &str) -> Result<Configuration> {
        info!("重命名环境: {} -> {}", config_id, new_name);
        self.client
            .request_as(
                Method::PUT,
                &format!("/configurations/{}", config_id),
                Some(serde_json::json!({ "name": new_name })),
            )
            .await
    }

    /// 设置空闲自动挂起时间（秒）
    pub async fn update_auto_suspend(
        &self,
        config_id: &str,
        suspend_on_idle: u64,
    ) -> Result<serde_json::Value> {
        info!("设置自动挂起: {} -> {}s", config_id, suspend_on_idle);
        self.client
            .request(
                Method::PUT,
                &format!("/configurations/{}", config_id),
                Some(serde_json::json!({ "suspend_on_idle": suspend_on_idle })),
            )
            .await
    }

    /// 清除空闲挂起/关机设置
    pub async fn disable_power_options(&self, config_id: &str) -> Result<serde_json::Value> {
        info!("清除电源选项: {}", config_id);
        self.edit(
            config_id,
            serde_json::json!({ "suspend_on_idle": "", "shutdown_on_idle": "" }),
        )
        .await
    }

    /// 切换环境运行状态
    pub async fn set_runstate(&self, config_id: &str, state: Runstate) -> Result<serde_json::Value> {
        info!("切换环境运行状态: {} -> {}", config_id, state);
        self.client
            .request(
                Method::PUT,
                &format!("/configurations/{}", config_id),
                Some(serde_json::json!({ "runstate": state })),
            )
            .await
    }

    /// 删除环境
    pub async fn delete(&self, config_id: &str) -> Result<serde_json::Value> {
        info!("删除环境: {}", config_id);
        self.client
            .request(
                Method::DELETE,
                &format!("/configurations/{}", config_id),
                None::<()>,
            )
            .await
    }

    /// 将模板中的虚拟机加入环境
    pub async fn add_template(&self, config_id: &str, template_id: &str) -> Result<serde_json::Value> {
        info!("将模板加入环境: {} -> {}", template_id, config_id);
        self.client
            .request(
                Method::POST,
                &format!("/configurations/{}/templates/{}", config_id, template_id),
                None::<()>,
            )
            .await
    }

    /// 更新环境用户数据
    pub async fn update_userdata(
        &self,
        config_id: &str,
        userdata: serde_json::Value,
    ) -> Result<serde_json::Value> {
        info!("更新环境用户数据: {}", config_id);
        self.client
            .request(
                Method::PUT,
                &format!("/configurations/{}/user_data", config_id),
                Some(userdata),
            )
            .await
    }
}
