//! 配置命令

use anyhow::Result;
use colored::Colorize;

use crate::config::CliConfig;
use crate::ConfigAction;

pub fn handle(action: ConfigAction, config: &CliConfig) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let path = CliConfig::config_path()?;
            println!("{} {}\n", "配置文件:".bold(), path.display().to_string().yellow());
            println!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
        ConfigAction::Init { template, force } => {
            let path = CliConfig::config_path()?;
            if path.exists() && !force {
                anyhow::bail!("配置文件已存在: {} (使用 --force 覆盖)", path.display());
            }

            let new_config = CliConfig {
                default_template: template,
                ..Default::default()
            };
            let path = new_config.save()?;
            println!(
                "{} 配置文件已生成: {}",
                "✓".green().bold(),
                path.display().to_string().cyan()
            );
            Ok(())
        }
    }
}
