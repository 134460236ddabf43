//! 共享门户流程

use serde::{Deserialize, Serialize};
use tracing::info;

use skytap_client::api::publish_set::DEFAULT_ACCESS;
use skytap_client::{PublishSetRequest, Result, SkytapClient, UrlShortener};

/// 环境没有名称时使用的发布集名称
pub const DEFAULT_PORTAL_NAME: &str = "Published set - single_url";

/// 共享门户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharingPortal {
    #[serde(rename = "LongURL")]
    pub long_url: Option<String>,

    #[serde(rename = "ShortURL")]
    pub short_url: Option<String>,

    #[serde(rename = "SharePassword")]
    pub share_password: Option<String>,
}

/// 为环境创建共享门户
///
/// 依次执行：读取环境名称 → 创建发布集 → 为全部虚拟机授权 → 设置密码（可选）
/// → 生成短链接。短链接失败时 `short_url` 与 `long_url` 相同。
pub async fn new_sharing_portal(
    client: &SkytapClient,
    shortener: &dyn UrlShortener,
    config_id: &str,
    share_password: Option<&str>,
) -> Result<SharingPortal> {
    let env = client.configurations().get(config_id).await?;
    let name = env
        .name
        .unwrap_or_else(|| DEFAULT_PORTAL_NAME.to_string());

    info!("创建共享门户: {} ({})", config_id, name);
    let publish_set = client
        .publish_sets()
        .create(config_id, &PublishSetRequest::default().with_name(name))
        .await?;

    client
        .publish_sets()
        .update_access(config_id, DEFAULT_ACCESS)
        .await?;

    let share_password = share_password.filter(|pw| !pw.is_empty());
    if let Some(pw) = share_password {
        client
            .publish_sets()
            .set_password(config_id, &publish_set.id, pw)
            .await?;
    }

    let short_url = match publish_set.desktops_url.as_deref() {
        Some(long_url) => Some(shortener.shorten(long_url).await),
        None => None,
    };

    Ok(SharingPortal {
        long_url: publish_set.desktops_url,
        short_url,
        share_password: share_password.map(str::to_string),
    })
}
