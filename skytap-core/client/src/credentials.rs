//! 凭据加载
//!
//! 从 `.env` 风格文件读取 `username`、`password` 以及可选的 `bitly_token`。

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::error::{Result, SkytapError};

/// Skytap 账号凭据
#[derive(Clone)]
pub struct Credentials {
    /// 用户名
    pub username: String,

    /// 密码或 API 令牌
    pub password: String,

    /// Bitly 令牌
    pub bitly_token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("bitly_token", &self.bitly_token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            bitly_token: None,
        }
    }

    /// 从 `.env` 文件加载凭据
    ///
    /// 文件不存在、缺少 `username` 或 `password` 时返回配置错误。
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SkytapError::Config(format!(
                "凭据文件 {} 不存在",
                path.display()
            )));
        }

        let iter = dotenvy::from_path_iter(path)
            .map_err(|e| SkytapError::Config(format!("读取凭据文件失败: {}", e)))?;

        let mut values = HashMap::new();
        for item in iter {
            let (key, value) =
                item.map_err(|e| SkytapError::Config(format!("解析凭据文件失败: {}", e)))?;
            values.insert(key, value);
        }

        let username = values.remove("username");
        let password = values.remove("password");
        let (Some(username), Some(password)) = (username, password) else {
            return Err(SkytapError::Config(
                "凭据文件中必须提供 username 和 password".to_string(),
            ));
        };

        info!("已加载凭据: {}", path.display());
        Ok(Self {
            username,
            password,
            bitly_token: values.remove("bitly_token").filter(|t| !t.is_empty()),
        })
    }
}
