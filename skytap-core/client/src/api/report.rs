//! 用量/审计报表 API
//!
//! 两类报表共用"创建 → 轮询 → 就绪后下载 CSV"的流程，
//! 由 [`ReportJob`] 按资源路径参数化实现。

use chrono::{Datelike, NaiveDateTime, Timelike};
use reqwest::Method;
use serde::Serialize;
use tracing::{debug, info};

use crate::client::SkytapClient;
use crate::error::{Result, SkytapError};

/// 用量报表资源路径
pub const USAGE_REPORT_PATH: &str = "/reports";

/// 审计报表资源路径
pub const AUDIT_REPORT_PATH: &str = "/auditing/exports";

/// 报表轮询状态
#[derive(Debug, Clone, PartialEq)]
pub enum ReportStatus {
    /// 尚未就绪，携带远端返回的状态
    Pending(serde_json::Value),
    /// 已就绪，携带 CSV 内容
    Ready(String),
}

/// 报表查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    /// 新建报表，携带创建响应（包含报表 ID）
    Created(serde_json::Value),
    Pending(serde_json::Value),
    Ready(String),
}

impl From<ReportStatus> for ReportOutcome {
    fn from(status: ReportStatus) -> Self {
        match status {
            ReportStatus::Pending(v) => ReportOutcome::Pending(v),
            ReportStatus::Ready(csv) => ReportOutcome::Ready(csv),
        }
    }
}

/// 可轮询的报表任务
pub struct ReportJob<'a> {
    client: &'a SkytapClient,
    resource: &'static str,
}

impl<'a> ReportJob<'a> {
    pub fn new(client: &'a SkytapClient, resource: &'static str) -> Self {
        Self { client, resource }
    }

    /// 资源路径
    pub fn resource(&self) -> &'static str {
        self.resource
    }

    /// 创建报表任务
    pub async fn create<B: Serialize>(&self, body: &B) -> Result<serde_json::Value> {
        info!("创建报表: {}", self.resource);
        self.client
            .request(Method::POST, self.resource, Some(body))
            .await
    }

    /// 查询报表状态
    pub async fn status(&self, report_id: &str) -> Result<serde_json::Value> {
        debug!("查询报表状态: {}/{}", self.resource, report_id);
        self.client
            .request(
                Method::GET,
                &format!("{}/{}", self.resource, report_id),
                None::<()>,
            )
            .await
    }

    /// 下载 CSV 内容
    pub async fn fetch_csv(&self, report_id: &str) -> Result<String> {
        info!("下载报表 CSV: {}/{}", self.resource, report_id);
        self.client
            .request_text(Method::GET, &format!("{}/{}.csv", self.resource, report_id))
            .await
    }

    /// 轮询一次：就绪则下载 CSV，否则原样返回状态
    pub async fn poll(&self, report_id: &str) -> Result<ReportStatus> {
        let status = self.status(report_id).await?;
        if is_ready(&status) {
            let csv = self.fetch_csv(report_id).await?;
            return Ok(ReportStatus::Ready(csv));
        }
        Ok(ReportStatus::Pending(status))
    }

    /// 按客户端配置的间隔轮询直到报表就绪
    pub async fn wait(&self, report_id: &str) -> Result<String> {
        let interval = self.client.config().poll_interval;
        loop {
            match self.poll(report_id).await? {
                ReportStatus::Ready(csv) => return Ok(csv),
                ReportStatus::Pending(_) => {
                    debug!("报表未就绪, {:?} 后重试: {}", interval, report_id);
                    tokio::time::sleep(interval).await;
                }
            }
        }
    }
}

fn is_ready(status: &serde_json::Value) -> bool {
    status
        .get("ready")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false)
}

/// 用量报表参数
#[derive(Debug, Clone, Serialize)]
pub struct UsageQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub resource_type: String,
    pub region: String,
    pub group_by: String,
    pub aggregate_by: String,
    pub results_format: String,
    pub utc: bool,
    pub notify_by_email: bool,
}

impl Default for UsageQuery {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            resource_type: "svms".to_string(),
            region: "all".to_string(),
            group_by: "user".to_string(),
            aggregate_by: "month".to_string(),
            results_format: "csv".to_string(),
            utc: true,
            notify_by_email: false,
        }
    }
}

impl UsageQuery {
    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start_date: Some(start.into()),
            end_date: Some(end.into()),
            ..Default::default()
        }
    }
}

/// 审计报表参数
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    pub start_at: Option<NaiveDateTime>,
    pub end_at: Option<NaiveDateTime>,
    pub activity: String,
}

impl AuditQuery {
    pub fn between(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start_at: Some(start),
            end_at: Some(end),
            activity: String::new(),
        }
    }

    pub fn with_activity(mut self, activity: impl Into<String>) -> Self {
        self.activity = activity.into();
        self
    }

    /// 生成创建请求体，起止时间缺一不可
    pub fn to_body(&self) -> Result<serde_json::Value> {
        let (Some(start), Some(end)) = (self.start_at, self.end_at) else {
            return Err(SkytapError::Config(
                "新建审计报表必须提供 start_at 和 end_at".to_string(),
            ));
        };

        Ok(serde_json::json!({
            "date_start": date_parts(&start),
            "date_end": date_parts(&end),
            "activity": self.activity,
            "notify_by_email": false,
        }))
    }
}

fn date_parts(t: &NaiveDateTime) -> serde_json::Value {
    serde_json::json!({
        "year": t.year(),
        "month": t.month(),
        "day": t.day(),
        "hour": t.hour(),
        "minute": t.minute(),
    })
}

/// 报表 API
pub struct ReportApi<'a> {
    client: &'a SkytapClient,
}

impl<'a> ReportApi<'a> {
    /// 创建新的报表 API 实例
    pub(crate) fn new(client: &'a SkytapClient) -> Self {
        Self { client }
    }

    /// 用量报表任务
    pub fn usage(&self) -> ReportJob<'a> {
        ReportJob::new(self.client, USAGE_REPORT_PATH)
    }

    /// 审计报表任务
    pub fn audit(&self) -> ReportJob<'a> {
        ReportJob::new(self.client, AUDIT_REPORT_PATH)
    }

    /// 创建或查询用量报表
    ///
    /// `report_id` 为 `None` 时新建报表；否则查询状态，就绪时返回 CSV。
    pub async fn get_usage(&self, report_id: Option<&str>, query: &UsageQuery) -> Result<ReportOutcome> {
        let job = self.usage();
        match report_id {
            None => Ok(ReportOutcome::Created(job.create(query).await?)),
            Some(id) => Ok(job.poll(id).await?.into()),
        }
    }

    /// 创建或查询审计报表
    ///
    /// 新建时 `query` 必须带起止时间，否则不发请求直接返回配置错误。
    pub async fn get_audit_report(
        &self,
        report_id: Option<&str>,
        query: &AuditQuery,
    ) -> Result<ReportOutcome> {
        let job = self.audit();
        match report_id {
            None => {
                let body = query.to_body()?;
                Ok(ReportOutcome::Created(job.create(&body).await?))
            }
            Some(id) => Ok(job.poll(id).await?.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_usage_query_defaults() {
        let body = serde_json::to_value(UsageQuery::between("2024/01/01", "2024/02/01")).unwrap();
        assert_eq!(body["start_date"], "2024/01/01");
        assert_eq!(body["resource_type"], "svms");
        assert_eq!(body["region"], "all");
        assert_eq!(body["group_by"], "user");
        assert_eq!(body["aggregate_by"], "month");
        assert_eq!(body["results_format"], "csv");
        assert_eq!(body["utc"], true);
        assert_eq!(body["notify_by_email"], false);
    }

    #[test]
    fn test_audit_query_body() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(7, 30, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        let body = AuditQuery::between(start, end)
            .with_activity("login")
            .to_body()
            .unwrap();
        assert_eq!(body["date_start"]["year"], 2024);
        assert_eq!(body["date_start"]["month"], 3);
        assert_eq!(body["date_start"]["day"], 5);
        assert_eq!(body["date_start"]["hour"], 7);
        assert_eq!(body["date_start"]["minute"], 30);
        assert_eq!(body["date_end"]["month"], 4);
        assert_eq!(body["activity"], "login");
    }

    #[test]
    fn test_audit_query_requires_both_timestamps() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let query = AuditQuery {
            start_at: Some(start),
            ..Default::default()
        };
        assert!(matches!(query.to_body(), Err(SkytapError::Config(_))));
        assert!(matches!(AuditQuery::default().to_body(), Err(SkytapError::Config(_))));
    }

    #[test]
    fn test_is_ready() {
        assert!(is_ready(&serde_json::json!({"ready": true})));
        assert!(!is_ready(&serde_json::json!({"ready": false})));
        assert!(!is_ready(&serde_json::json!({"id": "1"})));
        assert!(!is_ready(&serde_json::Value::Null));
    }
}
