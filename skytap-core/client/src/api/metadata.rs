//! 虚拟机元数据 API
//!
//! 只能在 Skytap 虚拟机内部调用：元数据服务位于本机所在子网的 `.254` 地址。

use std::net::Ipv4Addr;

use tracing::info;

use crate::client::SkytapClient;
use crate::error::{Result, SkytapError};

/// 虚拟机元数据 API
pub struct MetadataApi<'a> {
    client: &'a SkytapClient,
}

impl<'a> MetadataApi<'a> {
    /// 创建新的元数据 API 实例
    pub(crate) fn new(client: &'a SkytapClient) -> Self {
        Self { client }
    }

    /// 读取本机元数据
    ///
    /// # Arguments
    /// * `host_ip` - 虚拟机自身的 IPv4 地址
    pub async fn fetch(&self, host_ip: Ipv4Addr) -> Result<serde_json::Value> {
        let url = metadata_url(host_ip);
        info!("读取虚拟机元数据: {}", url);

        let response = self
            .client
            .http_client()
            .get(&url)
            .send()
            .await
            .map_err(|e| SkytapError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SkytapError::Request {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body,
                method: "GET".to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| SkytapError::Parse(e.to_string()))
    }
}

/// 元数据服务地址
pub fn metadata_url(host_ip: Ipv4Addr) -> String {
    let [a, b, c, _] = host_ip.octets();
    format!("http://{}.{}.{}.254/skytap", a, b, c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_url() {
        assert_eq!(
            metadata_url(Ipv4Addr::new(10, 0, 0, 17)),
            "http://10.0.0.254/skytap"
        );
    }
}
