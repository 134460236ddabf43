//! 公网 IP API

use reqwest::Method;
use tracing::info;

use crate::client::SkytapClient;
use crate::error::Result;

/// 公网 IP API
pub struct IpApi<'a> {
    client: &'a SkytapClient,
}

impl<'a> IpApi<'a> {
    /// 创建新的公网 IP API 实例
    pub(crate) fn new(client: &'a SkytapClient) -> Self {
        Self { client }
    }

    /// 查询账号下的公网 IP
    pub async fn list(&self) -> Result<serde_json::Value> {
        info!("查询公网 IP 列表");
        self.client.request(Method::GET, "/ips", None::<()>).await
    }

    /// 查询未绑定网卡的公网 IP
    ///
    /// # Arguments
    /// * `region` - 按区域过滤，`None` 表示全部区域
    pub async fn unassigned(&self, region: Option<&str>) -> Result<Vec<serde_json::Value>> {
        let ips = self.list().await?;
        let unassigned = filter_unassigned(ips, region);
        info!("未绑定的公网 IP: {} 个", unassigned.len());
        Ok(unassigned)
    }
}

/// 筛选 `nics` 为空的 IP
pub fn filter_unassigned(ips: serde_json::Value, region: Option<&str>) -> Vec<serde_json::Value> {
    let serde_json::Value::Array(ips) = ips else {
        return Vec::new();
    };

    ips.into_iter()
        .filter(|ip| ip.is_object())
        .filter(|ip| {
            ip.get("nics")
                .and_then(serde_json::Value::as_array)
                .map(|nics| nics.is_empty())
                .unwrap_or(true)
        })
        .filter(|ip| match region {
            Some(r) if !r.is_empty() => ip["region"].as_str() == Some(r),
            _ => true,
        })
        .collect()
}
