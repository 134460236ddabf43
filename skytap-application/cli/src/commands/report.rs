//! 用量/审计报表命令

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use colored::Colorize;
use skytap_client::models::value_id;
use skytap_client::{AuditQuery, ReportJob, ReportOutcome, UsageQuery};

use super::common::{create_client, write_csv};
use super::output::print_json;
use crate::config::CliConfig;
use crate::ReportAction;

/// 审计报表时间格式
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub async fn handle(action: ReportAction, config: &CliConfig) -> Result<()> {
    let client = create_client(config)?;
    let reports = client.reports();

    match action {
        ReportAction::Usage {
            id,
            start,
            end,
            resource_type,
            region,
            wait,
            output,
        } => {
            let query = UsageQuery {
                start_date: start,
                end_date: end,
                resource_type,
                region,
                ..Default::default()
            };
            let outcome = reports
                .get_usage(id.as_deref(), &query)
                .await
                .context("查询用量报表失败")?;
            finish(reports.usage(), id.as_deref(), outcome, wait, output.as_deref()).await
        }
        ReportAction::Audit {
            id,
            start,
            end,
            activity,
            wait,
            output,
        } => {
            let query = AuditQuery {
                start_at: start.as_deref().map(parse_time).transpose()?,
                end_at: end.as_deref().map(parse_time).transpose()?,
                activity,
            };
            let outcome = reports
                .get_audit_report(id.as_deref(), &query)
                .await
                .context("查询审计报表失败")?;
            finish(reports.audit(), id.as_deref(), outcome, wait, output.as_deref()).await
        }
    }
}

/// 输出报表结果，`wait` 时轮询直到就绪
async fn finish(
    job: ReportJob<'_>,
    report_id: Option<&str>,
    outcome: ReportOutcome,
    wait: bool,
    output: Option<&str>,
) -> Result<()> {
    match outcome {
        ReportOutcome::Ready(csv) => write_csv(&csv, output),
        ReportOutcome::Created(body) | ReportOutcome::Pending(body) if wait => {
            let id = report_id
                .map(str::to_string)
                .or_else(|| value_id(&body))
                .context("报表响应中缺少 id")?;
            println!("{} 等待报表 {} 就绪...", "…".bright_black(), id.cyan());
            let csv = job.wait(&id).await.context("等待报表失败")?;
            write_csv(&csv, output)
        }
        ReportOutcome::Created(created) => {
            println!("{} 报表已创建", "✓".green().bold());
            print_json(&created)
        }
        ReportOutcome::Pending(status) => {
            println!("{}", "报表尚未就绪".yellow());
            print_json(&status)
        }
    }
}

fn parse_time(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIME_FORMAT)
        .with_context(|| format!("时间格式错误 (应为 YYYY-MM-DD HH:MM): {}", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_time() {
        let t = parse_time("2024-03-05 07:30").unwrap();
        assert_eq!(t.year(), 2024);
        assert_eq!(t.day(), 5);
        assert_eq!(t.minute(), 30);
        assert!(parse_time("2024/03/05").is_err());
    }
}
