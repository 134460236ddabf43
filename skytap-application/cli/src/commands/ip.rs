//! 公网 IP 命令

use anyhow::{Context, Result};
use colored::Colorize;

use super::common::create_client;
use crate::config::CliConfig;
use crate::IpAction;

pub async fn handle(action: IpAction, config: &CliConfig) -> Result<()> {
    match action {
        IpAction::Unassigned { region } => {
            let client = create_client(config)?;
            let ips = client
                .ips()
                .unassigned(region.as_deref())
                .await
                .context("查询公网 IP 失败")?;

            if ips.is_empty() {
                println!("{}", "没有未绑定的公网 IP".yellow());
                return Ok(());
            }

            println!("{}\n", "未绑定的公网 IP:".bold());
            for ip in &ips {
                println!(
                    "  {} {}  {}",
                    "*".green().bold(),
                    ip["address"].as_str().unwrap_or("-").cyan(),
                    ip["region"].as_str().unwrap_or("-").bright_black()
                );
            }
            Ok(())
        }
    }
}
