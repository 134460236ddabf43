//! 标签命令

use anyhow::{Context, Result};
use colored::Colorize;

use super::common::create_client;
use crate::config::CliConfig;
use crate::TagAction;

pub async fn handle(action: TagAction, config: &CliConfig) -> Result<()> {
    match action {
        TagAction::Remove { config_id, tag } => {
            let client = create_client(config)?;
            let results = client
                .tags()
                .remove(&config_id, tag.as_str())
                .await
                .with_context(|| format!("删除标签失败: {}", config_id))?;

            let failed = results.iter().filter(|r| r.is_none()).count();
            if failed == 0 {
                println!(
                    "{} 已删除环境 {} 的 {} 个标签",
                    "✓".green().bold(),
                    config_id.cyan().bold(),
                    results.len()
                );
            } else {
                println!(
                    "{} 环境 {} 的标签删除完成: 成功 {}, 失败 {}",
                    "!".yellow().bold(),
                    config_id.cyan().bold(),
                    (results.len() - failed).to_string().green(),
                    failed.to_string().red()
                );
            }
            Ok(())
        }
    }
}
