//! 网络管理 API
//!
//! 提供网络管理功能，包括：
//! - 环境网络与子网
//! - 虚拟机网卡
//! - 网络隧道（ICNR）
//! - WAN (VPN) 连接
//! - 发布服务与公网 IP 绑定

use reqwest::Method;
use tracing::info;

use crate::client::SkytapClient;
use crate::error::Result;

/// 网络管理 API
pub struct NetworkApi<'a> {
    client: &'a SkytapClient,
}

impl<'a> NetworkApi<'a> {
    /// 创建新的网络 API 实例
    pub(crate) fn new(client: &'a SkytapClient) -> Self {
        Self { client }
    }

    // ============================================
    // 环境网络
    // ============================================

    /// 获取环境网络详情
    pub async fn get(&self, config_id: &str, network_id: &str) -> Result<serde_json::Value> {
        info!("获取网络详情: {}/{}", config_id, network_id);
        self.client
            .request(
                Method::GET,
                &format!("/configurations/{}/networks/{}", config_id, network_id),
                None::<()>,
            )
            .await
    }

    /// 修改网络子网
    ///
    /// # Arguments
    /// * `subnet_cidr` - 子网，如 `10.0.0.0/24`
    pub async fn edit_subnet(
        &self,
        config_id: &str,
        network_id: &str,
        subnet_cidr: &str,
    ) -> Result<serde_json::Value> {
        info!("修改子网: {}/{} -> {}", config_id, network_id, subnet_cidr);
        self.client
            .request(
                Method::PUT,
                &format!("/configurations/{}/networks/{}", config_id, network_id),
                Some(serde_json::json!({ "subnet": subnet_cidr })),
            )
            .await
    }

    // ============================================
    // 网卡管理
    // ============================================

    /// 添加网卡
    ///
    /// # Arguments
    /// * `nic_type` - 网卡类型，通常为 `default`
    pub async fn add_adapter(
        &self,
        config_id: &str,
        vm_id: &str,
        nic_type: &str,
    ) -> Result<serde_json::Value> {
        info!("添加网卡: {}/{} ({})", config_id, vm_id, nic_type);
        self.client
            .request(
                Method::POST,
                &format!("/configurations/{}/vms/{}/interfaces", config_id, vm_id),
                Some(serde_json::json!({ "nic_type": nic_type })),
            )
            .await
    }

    /// 修改网卡
    pub async fn edit_adapter(
        &self,
        config_id: &str,
        vm_id: &str,
        interface_id: &str,
        attributes: serde_json::Value,
    ) -> Result<serde_json::Value> {
        info!("修改网卡: {}/{}/{}", config_id, vm_id, interface_id);
        self.client
            .request(
                Method::PUT,
                &format!(
                    "/configurations/{}/vms/{}/interfaces/{}",
                    config_id, vm_id, interface_id
                ),
                Some(attributes),
            )
            .await
    }

    // ============================================
    // 网络隧道
    // ============================================

    /// 连接两个网络
    pub async fn connect(&self, source_network: &str, target_network: &str) -> Result<serde_json::Value> {
        info!("连接网络: {} -> {}", source_network, target_network);
        self.client
            .request(
                Method::POST,
                "/tunnels",
                Some(serde_json::json!({
                    "source_network_id": source_network,
                    "target_network_id": target_network,
                })),
            )
            .await
    }

    /// 断开网络隧道
    pub async fn disconnect(&self, tunnel_id: &str) -> Result<serde_json::Value> {
        info!("断开网络隧道: {}", tunnel_id);
        self.client
            .request(Method::DELETE, &format!("/tunnels/{}", tunnel_id), None::<()>)
            .await
    }

    // ============================================
    // WAN
    // ============================================

    /// 将 WAN 挂接到环境网络
    pub async fn attach_wan(
        &self,
        config_id: &str,
        network_id: &str,
        wan_id: &str,
    ) -> Result<serde_json::Value> {
        info!("挂接 WAN: {} -> {}/{}", wan_id, config_id, network_id);
        self.client
            .request(
                Method::POST,
                &format!(
                    "/configurations/{}/networks/{}/wans/{}",
                    config_id, network_id, wan_id
                ),
                None::<()>,
            )
            .await
    }

    /// 连接已挂接的 WAN
    pub async fn connect_wan(
        &self,
        config_id: &str,
        network_id: &str,
        wan_id: &str,
    ) -> Result<serde_json::Value> {
        info!("连接 WAN: {} -> {}/{}", wan_id, config_id, network_id);
        self.client
            .request(
                Method::POST,
                &format!(
                    "/configurations/{}/networks/{}/wans/{}/connect",
                    config_id, network_id, wan_id
                ),
                None::<()>,
            )
            .await
    }

    /// 获取 WAN 详情
    pub async fn get_wan(&self, wan_id: &str) -> Result<serde_json::Value> {
        info!("获取 WAN 详情: {}", wan_id);
        self.client
            .request(Method::GET, &format!("/wans/{}", wan_id), None::<()>)
            .await
    }

    // ============================================
    // 发布服务与公网 IP
    // ============================================

    /// 查询网卡上的发布服务
    pub async fn published_services(
        &self,
        config_id: &str,
        vm_id: &str,
        interface_id: &str,
    ) -> Result<serde_json::Value> {
        info!("查询发布服务: {}/{}/{}", config_id, vm_id, interface_id);
        self.client
            .request(
                Method::GET,
                &format!(
                    "/configurations/{}/vms/{}/interfaces/{}/services",
                    config_id, vm_id, interface_id
                ),
                None::<()>,
            )
            .await
    }

    /// 发布服务端口
    pub async fn publish_service(
        &self,
        config_id: &str,
        vm_id: &str,
        interface_id: &str,
        service_id: &str,
        port: &str,
    ) -> Result<serde_json::Value> {
        info!(
            "发布服务: {}/{}/{} -> {} ({})",
            config_id, vm_id, interface_id, service_id, port
        );
        self.client
            .request(
                Method::POST,
                &format!(
                    "/configurations/{}/vms/{}/interfaces/{}/services/{}",
                    config_id, vm_id, interface_id, service_id
                ),
                Some(serde_json::json!({ "port": port })),
            )
            .await
    }

    /// 绑定公网 IP 到网卡
    pub async fn connect_public_ip(
        &self,
        vm_id: &str,
        interface_id: &str,
        public_ip: &str,
    ) -> Result<serde_json::Value> {
        info!("绑定公网 IP: {} -> {}/{}", public_ip, vm_id, interface_id);
        self.client
            .request(
                Method::POST,
                &format!("/vms/{}/interfaces/{}/ips", vm_id, interface_id),
                Some(serde_json::json!({ "ip": public_ip })),
            )
            .await
    }
}
