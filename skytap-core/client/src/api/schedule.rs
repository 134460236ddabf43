//! 计划任务 API

use reqwest::Method;
use tracing::info;

use crate::client::SkytapClient;
use crate::error::Result;
use crate::models::ScheduleRequest;

/// 计划任务 API
pub struct ScheduleApi<'a> {
    client: &'a SkytapClient,
}

impl<'a> ScheduleApi<'a> {
    /// 创建新的计划任务 API 实例
    pub(crate) fn new(client: &'a SkytapClient) -> Self {
        Self { client }
    }

    /// 查询计划任务列表
    pub async fn list(&self) -> Result<serde_json::Value> {
        info!("查询计划任务列表");
        self.client
            .request(Method::GET, "/schedules", None::<()>)
            .await
    }

    /// 查询计划任务详情
    pub async fn get(&self, schedule_id: &str) -> Result<serde_json::Value> {
        info!("查询计划任务详情: {}", schedule_id);
        self.client
            .request(Method::GET, &format!("/schedules/{}", schedule_id), None::<()>)
            .await
    }

    /// 创建计划任务
    ///
    /// # Example
    /// ```ignore
    /// let req = ScheduleRequest::new(
    ///     ScheduleTarget::Configuration("config-1".into()),
    ///     "夜间挂起",
    ///     vec![serde_json::json!({ "type": "suspend", "offset": 0 })],
    ///     "2024/01/01 20:00:00",
    /// )
    /// .with_recurring_days("weekdays");
    /// client.schedules().create(&req).await?;
    /// ```
    pub async fn create(&self, req: &ScheduleRequest) -> Result<serde_json::Value> {
        info!("创建计划任务: {} ({:?})", req.title, req.target);
        self.client
            .request(Method::POST, "/schedules", Some(req.to_body()))
            .await
    }
}
