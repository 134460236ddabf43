//! 共享门户命令

use anyhow::{Context, Result};
use colored::Colorize;
use skytap_client::{share_password, util::SHARE_PASSWORD_LEN, BitlyShortener};
use skytap_workflows::new_sharing_portal;

use super::common::create_client;
use super::output::print_json;
use crate::config::CliConfig;
use crate::PortalAction;

pub async fn handle(action: PortalAction, config: &CliConfig) -> Result<()> {
    match action {
        PortalAction::New {
            env_id,
            password,
            generate_password,
        } => {
            let client = create_client(config)?;
            let shortener = BitlyShortener::for_client(&client);
            if !shortener.has_token() {
                println!("{}", "未配置 Bitly 令牌，短链接与原链接相同".yellow());
            }

            let password = if generate_password {
                Some(share_password(SHARE_PASSWORD_LEN))
            } else {
                password
            };

            let portal = new_sharing_portal(&client, &shortener, &env_id, password.as_deref())
                .await
                .with_context(|| format!("创建共享门户失败: {}", env_id))?;

            println!("{} 环境 {} 的共享门户已创建", "✓".green().bold(), env_id.cyan().bold());
            print_json(&portal)
        }
    }
}
