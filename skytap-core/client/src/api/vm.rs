//! 虚拟机管理 API

use reqwest::Method;
use tracing::info;

use crate::client::SkytapClient;
use crate::error::Result;
use crate::models::{Runstate, Vm};

/// 虚拟机管理 API
pub struct VmApi<'a> {
    client: &'a SkytapClient,
}

impl<'a> VmApi<'a> {
    /// 创建新的虚拟机 API 实例
    pub(crate) fn new(client: &'a SkytapClient) -> Self {
        Self { client }
    }

    /// 查询环境下的虚拟机列表
    pub async fn list(&self, config_id: &str) -> Result<Vec<Vm>> {
        info!("查询虚拟机列表: {}", config_id);
        self.client
            .request_list(&format!("/configurations/{}/vms", config_id))
            .await
    }

    /// 查询虚拟机详情
    pub async fn get(&self, config_id: &str, vm_id: &str) -> Result<Vm> {
        info!("查询虚拟机详情: {}/{}", config_id, vm_id);
        self.client
            .request_as(
                Method::GET,
                &format!("/configurations/{}/vms/{}", config_id, vm_id),
                None::<()>,
            )
            .await
    }

    /// 修改虚拟机属性
    pub async fn edit(
        &self,
        config_id: &str,
        vm_id: &str,
        attributes: serde_json::Value,
    ) -> Result<serde_json::Value> {
        info!("修改虚拟机属性: {}/{}", config_id, vm_id);
        self.client
            .request(
                Method::PUT,
                &format!("/configurations/{}/vms/{}", config_id, vm_id),
                Some(attributes),
            )
            .await
    }

    /// 切换单个虚拟机运行状态
    pub async fn set_runstate(
        &self,
        config_id: &str,
        vm_id: &str,
        state: Runstate,
    ) -> Result<serde_json::Value> {
        info!("切换虚拟机运行状态: {}/{} -> {}", config_id, vm_id, state);
        self.client
            .request(
                Method::PUT,
                &format!("/configurations/{}/vms/{}", config_id, vm_id),
                Some(serde_json::json!({ "runstate": state })),
            )
            .await
    }

    /// 从环境中删除虚拟机
    pub async fn delete(&self, config_id: &str, vm_id: &str) -> Result<serde_json::Value> {
        info!("从环境删除虚拟机: {}/{}", config_id, vm_id);
        self.client
            .request(
                Method::DELETE,
                &format!("/configurations/{}/vms/{}", config_id, vm_id),
                None::<()>,
            )
            .await
    }

    /// 获取虚拟机用户数据
    pub async fn user_data(&self, config_id: &str, vm_id: &str) -> Result<serde_json::Value> {
        info!("获取虚拟机用户数据: {}/{}", config_id, vm_id);
        self.client
            .request(
                Method::GET,
                &format!("/configurations/{}/vms/{}/user_data", config_id, vm_id),
                None::<()>,
            )
            .await
    }

    /// 修改虚拟机用户数据
    pub async fn edit_user_data(
        &self,
        config_id: &str,
        vm_id: &str,
        contents: &str,
    ) -> Result<serde_json::Value> {
        info!("修改虚拟机用户数据: {}/{}", config_id, vm_id);
        self.client
            .request(
                Method::PUT,
                &format!("/configurations/{}/vms/{}/user_data", config_id, vm_id),
                Some(serde_json::json!({ "contents": contents })),
            )
            .await
    }

    /// 获取虚拟机登录凭据
    pub async fn credentials(&self, vm_id: &str) -> Result<serde_json::Value> {
        info!("获取虚拟机凭据: {}", vm_id);
        self.client
            .request(Method::GET, &format!("/vms/{}/credentials", vm_id), None::<()>)
            .await
    }
}
