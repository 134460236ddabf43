//! 公共工具函数模块
//!
//! 提供各命令模块共享的功能：客户端创建、CSV 写出。

use anyhow::{Context, Result};
use colored::Colorize;
use skytap_client::{Credentials, SkytapClient};
use std::fs;
use tracing::info;

use crate::config::CliConfig;

/// 创建并认证 Skytap 客户端
pub fn create_client(config: &CliConfig) -> Result<SkytapClient> {
    let credentials = Credentials::from_env_file(&config.env_file)
        .with_context(|| format!("读取凭据失败: {}", config.env_file))?;

    let mut client = SkytapClient::new(&config.base_url, config.client_config())
        .context("创建 Skytap 客户端失败")?;
    client.authorize(&credentials);

    info!("Skytap 客户端就绪: {}", config.base_url);
    Ok(client)
}

/// 输出 CSV：指定文件时写入文件，否则打印到标准输出
pub fn write_csv(csv: &str, output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, csv).with_context(|| format!("写入文件失败: {}", path))?;
            println!("{} 报表已保存到 {}", "✓".green().bold(), path.cyan());
        }
        None => print!("{}", csv),
    }
    Ok(())
}
