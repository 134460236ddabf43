//! 短链接服务
//!
//! 短链接只是锦上添花：令牌缺失、网络错误、非 2xx 或响应缺少 `link`
//! 时一律返回原始长链接，绝不报错。

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::client::SkytapClient;
use crate::error::{Result, SkytapError};

/// Bitly 短链接接口
pub const BITLY_ENDPOINT: &str = "https://api-ssl.bitly.com/v4/shorten";

/// Bitly 令牌环境变量
pub const BITLY_TOKEN_ENV: &str = "BITLY_AUTH_TOKEN";

/// 短链接生成器
#[async_trait]
pub trait UrlShortener: Send + Sync {
    /// 生成短链接，失败时返回原链接
    async fn shorten(&self, long_url: &str) -> String;
}

/// Bitly 短链接生成器
pub struct BitlyShortener {
    http_client: Client,
    endpoint: String,
    token: Option<String>,
}

impl BitlyShortener {
    pub fn new(token: Option<String>) -> Self {
        Self {
            http_client: Client::new(),
            endpoint: BITLY_ENDPOINT.to_string(),
            token,
        }
    }

    /// 按 显式令牌 → 客户端令牌 → 环境变量 的顺序确定令牌
    pub fn resolve(explicit: Option<&str>, client_token: Option<&str>) -> Self {
        let env_token = std::env::var(BITLY_TOKEN_ENV).ok();
        Self::new(pick_token(explicit, client_token, env_token))
    }

    /// 使用客户端持有的令牌（缺失时回退到环境变量）
    pub fn for_client(client: &SkytapClient) -> Self {
        Self::resolve(None, client.bitly_token())
    }

    /// 替换接口地址
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    async fn try_shorten(&self, long_url: &str, token: &str) -> Result<String> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&serde_json::json!({ "domain": "bit.ly", "long_url": long_url }))
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
                method: "POST".to_string(),
            });
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SkytapError::Parse(e.to_string()))?;

        data.get("link")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| SkytapError::Parse("响应中缺少 link".to_string()))
    }
}

#[async_trait]
impl UrlShortener for BitlyShortener {
    async fn shorten(&self, long_url: &str) -> String {
        let Some(token) = self.token.as_deref() else {
            debug!("未配置 Bitly 令牌, 使用原链接");
            return long_url.to_string();
        };

        match self.try_shorten(long_url, token).await {
            Ok(link) => link,
            Err(e) => {
                warn!("生成短链接失败, 使用原链接: {}", e);
                long_url.to_string()
            }
        }
    }
}

fn pick_token(
    explicit: Option<&str>,
    client_token: Option<&str>,
    env_token: Option<String>,
) -> Option<String> {
    explicit
        .filter(|t| !t.is_empty())
        .or(client_token.filter(|t| !t.is_empty()))
        .map(str::to_string)
        .or(env_token.filter(|t| !t.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_token_order() {
        assert_eq!(
            pick_token(Some("a"), Some("b"), Some("c".into())),
            Some("a".to_string())
        );
        assert_eq!(
            pick_token(None, Some("b"), Some("c".into())),
            Some("b".to_string())
        );
        assert_eq!(pick_token(None, None, Some("c".into())), Some("c".to_string()));
        assert_eq!(pick_token(None, None, None), None);
        assert_eq!(pick_token(Some(""), None, None), None);
        assert_eq!(
            pick_token(Some(""), Some("b"), Some("c".into())),
            Some("b".to_string())
        );
        assert_eq!(
            pick_token(None, Some(""), Some("c".into())),
            Some("c".to_string())
        );
        assert_eq!(pick_token(Some(""), Some(""), Some(String::new())), None);
    }

    #[tokio::test]
    async fn test_shorten_without_token_returns_original() {
        let shortener = BitlyShortener::new(None);
        assert!(!shortener.has_token());
        assert_eq!(
            shortener.shorten("https://example.com/x").await,
            "https://example.com/x"
        );
    }
}
