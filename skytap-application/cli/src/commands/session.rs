//! 培训会话命令

use anyhow::{Context, Result};
use colored::Colorize;
use skytap_workflows::{
    load_roster, EnvironmentStatus, NewSessionRequest, SessionOperations, SessionSize,
    SkytapSessions,
};
use std::sync::Arc;
use std::time::Duration;

use super::common::create_client;
use super::output::{output_formatted, print_json, TableRow};
use crate::config::CliConfig;
use crate::SessionAction;

pub async fn handle(action: SessionAction, config: &CliConfig) -> Result<()> {
    let sessions = SkytapSessions::new(Arc::new(create_client(config)?));

    match action {
        SessionAction::New {
            name,
            template,
            count,
            roster,
            disable_power_options,
        } => {
            let template = config.resolve_template(template)?;
            let size = match roster {
                Some(path) => SessionSize::Roster(load_roster(&path)?),
                None => SessionSize::Count(count.unwrap_or_default()),
            };
            new_session(&sessions, &name, &template, size, disable_power_options).await
        }
        SessionAction::Remove { project_id } => {
            sessions
                .remove_session(&project_id)
                .await
                .with_context(|| format!("删除会话失败: {}", project_id))?;
            println!("{} 会话 {} 已删除", "✓".green().bold(), project_id.cyan().bold());
            Ok(())
        }
        SessionAction::Start {
            project_id,
            delay_between,
            delay_after,
        } => {
            sessions
                .start_session(
                    &project_id,
                    Duration::from_secs(delay_between),
                    Duration::from_secs(delay_after),
                )
                .await
                .with_context(|| format!("启动会话失败: {}", project_id))?;
            println!("{} 会话 {} 已启动", "✓".green().bold(), project_id.cyan().bold());
            Ok(())
        }
        SessionAction::Stop {
            project_id,
            delay_between,
            delay_after,
        } => {
            sessions
                .stop_session(
                    &project_id,
                    Duration::from_secs(delay_between),
                    Duration::from_secs(delay_after),
                )
                .await
                .with_context(|| format!("停止会话失败: {}", project_id))?;
            println!("{} 会话 {} 已停止", "✓".green().bold(), project_id.cyan().bold());
            Ok(())
        }
        SessionAction::Status { project_id, format } => {
            status_session(&sessions, &project_id, &format).await
        }
        SessionAction::Replace {
            env_id,
            template_id,
        } => {
            sessions
                .replace_environment_with_template(&env_id, &template_id)
                .await
                .with_context(|| format!("替换环境失败: {}", env_id))?;
            println!(
                "{} 环境 {} 已替换为模板 {}",
                "✓".green().bold(),
                env_id.cyan().bold(),
                template_id.yellow()
            );
            Ok(())
        }
    }
}

async fn new_session(
    sessions: &SkytapSessions,
    name: &str,
    template: &str,
    size: SessionSize,
    disable_power_options: bool,
) -> Result<()> {
    let req = NewSessionRequest::new(name, template, size)
        .with_power_options_disabled(disable_power_options);

    let result = sessions
        .new_session(&req)
        .await
        .with_context(|| format!("创建会话失败: {}", name))?;

    println!(
        "{} 会话 {} 创建成功 (项目: {}, 环境: {} 个)",
        "✓".green().bold(),
        name.cyan().bold(),
        result.project_id.yellow(),
        result.environments.len()
    );
    print_json(&result)
}

async fn status_session(sessions: &SkytapSessions, project_id: &str, format: &str) -> Result<()> {
    let status = sessions
        .status_session(project_id)
        .await
        .with_context(|| format!("查询会话状态失败: {}", project_id))?;

    if format == "json" {
        return print_json(&status);
    }

    let report = &status.report;
    println!(
        "{} {}  运行中 {}/{}\n",
        "会话:".bold(),
        report.session_name.as_deref().unwrap_or("-").cyan().bold(),
        report.running_environments.to_string().green(),
        report.total_environments
    );
    output_formatted(&status.environments, format)
}

impl TableRow for EnvironmentStatus {
    fn headers() -> Vec<&'static str> {
        vec!["环境", "运行", "繁忙", "停止", "限流"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.environment_name.clone().unwrap_or_default(),
            self.running_vms.to_string(),
            self.busy_vms.to_string(),
            self.stopped_vms.to_string(),
            if self.rate_limited { "是" } else { "否" }.to_string(),
        ]
    }
}
