//! CLI 配置管理
//!
//! **数据存储方式**: TOML 文件 (~/.config/skytap/config.toml)
//!
//! 凭据不写入此文件，而是由 `env_file` 指向的 `.env` 文件提供。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use skytap_client::{SkytapConfig, DEFAULT_BASE_URL};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Skytap API 地址
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// 凭据文件 (username/password/bitly_token)
    #[serde(default = "default_env_file")]
    pub env_file: String,

    /// 日志文件
    #[serde(default = "default_log_file")]
    pub log_file: String,

    /// 环境就绪/报表轮询间隔（秒）
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// 默认模板 ID
    pub default_template: Option<String>,

    /// 配置版本
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_env_file() -> String {
    ".env".to_string()
}

fn default_log_file() -> String {
    "skytap.log".to_string()
}

fn default_poll_interval() -> u64 {
    5
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            env_file: default_env_file(),
            log_file: default_log_file(),
            poll_interval_secs: default_poll_interval(),
            default_template: None,
            version: default_version(),
        }
    }
}

impl CliConfig {
    /// 获取配置文件路径
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("无法获取用户主目录")?;
        Ok(home.join(".config").join("skytap").join("config.toml"))
    }

    /// 加载配置
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 从指定路径加载配置，文件不存在时使用默认值
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {:?}", path))?;

        toml::from_str(&content)
            .with_context(|| format!("解析配置文件失败: {:?}", path))
    }

    /// 保存配置
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// 保存配置到指定路径
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // 确保目录存在
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("创建配置目录失败: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("序列化配置失败")?;

        fs::write(path, content).with_context(|| format!("写入配置文件失败: {:?}", path))?;

        Ok(())
    }

    /// 客户端配置
    pub fn client_config(&self) -> SkytapConfig {
        SkytapConfig {
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            ..Default::default()
        }
    }

    /// 命令行指定的模板优先，否则使用默认模板
    pub fn resolve_template(&self, template: Option<String>) -> Result<String> {
        template
            .or_else(|| self.default_template.clone())
            .context("未指定模板，请使用 --template 或在配置文件中设置 default_template")
    }
}
