//! Skytap 客户端核心实现

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{header, Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::api::{
    ConfigurationApi, DepartmentApi, GroupApi, IpApi, MetadataApi, NetworkApi, ProjectApi,
    PublishSetApi, ReportApi, ScheduleApi, TagApi, TemplateApi, UserApi, VmApi,
};
use crate::credentials::Credentials;
use crate::error::{Result, SkytapError};

/// Skytap 公有云 API 地址
pub const DEFAULT_BASE_URL: &str = "https://cloud.skytap.com";

/// Skytap 客户端配置
#[derive(Debug, Clone)]
pub struct SkytapConfig {
    /// 连接超时（秒）
    pub connect_timeout: u64,

    /// 请求超时（秒）
    pub request_timeout: u64,

    /// 是否验证 SSL 证书
    pub verify_ssl: bool,

    /// 环境就绪/报表轮询间隔
    pub poll_interval: Duration,
}

impl Default for SkytapConfig {
    fn default() -> Self {
        Self {
            connect_timeout: 10,
            request_timeout: 30,
            verify_ssl: true,
            poll_interval: Duration::from_secs(5),
        }
    }
}

/// Skytap 客户端
///
/// 只持有配置（基础 URL、认证头、Bitly 令牌），不缓存任何远端实体。
pub struct SkytapClient {
    /// API 基础 URL
    base_url: String,

    /// HTTP 客户端
    http_client: Client,

    /// `Basic` 认证头
    authorization: Option<String>,

    /// Bitly 令牌
    bitly_token: Option<String>,

    /// 配置
    config: SkytapConfig,
}

impl SkytapClient {
    /// 创建新的 Skytap 客户端
    pub fn new(base_url: &str, config: SkytapConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(|e| SkytapError::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
            authorization: None,
            bitly_token: None,
            config,
        })
    }

    /// 使用凭据设置认证头
    ///
    /// 凭据中带有 `bitly_token` 时同时覆盖客户端持有的 Bitly 令牌。
    pub fn authorize(&mut self, credentials: &Credentials) {
        info!("设置 Skytap 认证: {}", credentials.username);
        let token = STANDARD.encode(format!("{}:{}", credentials.username, credentials.password));
        self.authorization = Some(format!("Basic {}", token));

        if let Some(bitly) = &credentials.bitly_token {
            self.bitly_token = Some(bitly.clone());
        }
    }

    /// 设置 Bitly 令牌
    pub fn with_bitly_token(mut self, token: impl Into<String>) -> Self {
        self.bitly_token = Some(token.into());
        self
    }

    /// 客户端持有的 Bitly 令牌
    pub fn bitly_token(&self) -> Option<&str> {
        self.bitly_token.as_deref()
    }

    /// 当前的认证头
    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref()
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 获取配置
    pub fn config(&self) -> &SkytapConfig {
        &self.config
    }

    /// 虚拟机在发布集中的引用地址
    pub fn vm_ref(&self, vm_id: &str) -> String {
        format!("{}/vms/{}", self.base_url, vm_id)
    }

    /// 获取项目管理 API
    pub fn projects(&self) -> ProjectApi<'_> {
        ProjectApi::new(self)
    }

    /// 获取环境（configuration）管理 API
    pub fn configurations(&self) -> ConfigurationApi<'_> {
        ConfigurationApi::new(self)
    }

    /// 获取虚拟机管理 API
    pub fn vms(&self) -> VmApi<'_> {
        VmApi::new(self)
    }

    /// 获取网络管理 API
    pub fn networks(&self) -> NetworkApi<'_> {
        NetworkApi::new(self)
    }

    /// 获取模板管理 API
    pub fn templates(&self) -> TemplateApi<'_> {
        TemplateApi::new(self)
    }

    /// 获取标签管理 API
    pub fn tags(&self) -> TagApi<'_> {
        TagApi::new(self)
    }

    /// 获取计划任务 API
    pub fn schedules(&self) -> ScheduleApi<'_> {
        ScheduleApi::new(self)
    }

    /// 获取报表 API
    pub fn reports(&self) -> ReportApi<'_> {
        ReportApi::new(self)
    }

    /// 获取发布集（共享门户）API
    pub fn publish_sets(&self) -> PublishSetApi<'_> {
        PublishSetApi::new(self)
    }

    /// 获取用户管理 API
    pub fn users(&self) -> UserApi<'_> {
        UserApi::new(self)
    }

    /// 获取用户组管理 API
    pub fn groups(&self) -> GroupApi<'_> {
        GroupApi::new(self)
    }

    /// 获取部门管理 API
    pub fn departments(&self) -> DepartmentApi<'_> {
        DepartmentApi::new(self)
    }

    /// 获取公网 IP API
    pub fn ips(&self) -> IpApi<'_> {
        IpApi::new(self)
    }

    /// 获取虚拟机元数据 API
    pub fn metadata(&self) -> MetadataApi<'_> {
        MetadataApi::new(self)
    }

    /// 发送 HTTP 请求
    ///
    /// 2xx 且响应体为空时返回 `Value::Null`，非 2xx 返回 [`SkytapError::Request`]。
    pub(crate) async fn request<T: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<T>,
    ) -> Result<serde_json::Value> {
        let text = self.send(method, path, body).await?;

        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| SkytapError::Parse(e.to_string()))
    }

    /// 发送 HTTP 请求并反序列化为指定类型
    pub(crate) async fn request_as<T: Serialize, R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<T>,
    ) -> Result<R> {
        let value = self.request(method, path, body).await?;
        serde_json::from_value(value).map_err(|e| SkytapError::Parse(e.to_string()))
    }

    /// 查询列表，空响应体视为空列表
    pub(crate) async fn request_list<R: DeserializeOwned>(&self, path: &str) -> Result<Vec<R>> {
        let value = self.request(Method::GET, path, None::<()>).await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(value).map_err(|e| SkytapError::Parse(e.to_string()))
    }

    /// 发送 HTTP 请求并返回原始文本（用于 CSV 报表）
    pub(crate) async fn request_text(&self, method: Method, path: &str) -> Result<String> {
        self.send(method, path, None::<()>).await
    }

    async fn send<T: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<T>,
    ) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Skytap API 请求: {} {}", method, url);

        let mut request = self
            .http_client
            .request(method.clone(), &url)
            .header(header::ACCEPT, "application/json");

        if let Some(auth) = &self.authorization {
            request = request.header(header::AUTHORIZATION, auth);
        }

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SkytapError::Http(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SkytapError::Http(e.to_string()))?;

        if !status.is_success() {
            warn!("API 请求失败: {} {} - {} {}", method, path, status, text);
            return Err(SkytapError::Request {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body: text,
                method: method.to_string(),
            });
        }

        Ok(text)
    }

    /// 获取 HTTP 客户端（内部使用）
    pub(crate) fn http_client(&self) -> &Client {
        &self.http_client
    }
}
