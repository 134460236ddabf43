//! 培训会话流程
//!
//! 一个会话对应一个项目，项目下每位学员一个环境。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use skytap_client::api::publish_set::DEFAULT_ACCESS;
use skytap_client::{
    merge_arrays, BitlyShortener, Result, Runstate, SkytapClient, SkytapError, UrlShortener,
};

use crate::provision::{EnvironmentProvisioner, ProvisionedEnvironment};
use crate::roster::{row_email, RosterRow};
use crate::status::{EnvironmentStatus, SessionStatus};

/// 会话规模
#[derive(Debug, Clone, PartialEq)]
pub enum SessionSize {
    /// 指定环境数量，环境名为 `<会话>(000)` 形式
    Count(usize),
    /// 按名单创建，环境名为 `<会话>(<email>)`
    Roster(Vec<RosterRow>),
}

/// 新建会话请求
#[derive(Debug, Clone)]
pub struct NewSessionRequest {
    pub session_name: String,
    pub template_id: String,
    pub size: SessionSize,
    pub disable_power_options: bool,
}

impl NewSessionRequest {
    pub fn new(
        session_name: impl Into<String>,
        template_id: impl Into<String>,
        size: SessionSize,
    ) -> Self {
        Self {
            session_name: session_name.into(),
            template_id: template_id.into(),
            size,
            disable_power_options: false,
        }
    }

    pub fn with_power_options_disabled(mut self, disable: bool) -> Self {
        self.disable_power_options = disable;
        self
    }

    /// 各环境名称及对应的名单行
    pub fn plan(&self) -> Vec<(String, RosterRow)> {
        match &self.size {
            SessionSize::Count(count) => (0..*count)
                .map(|i| (format!("{}({:03})", self.session_name, i), RosterRow::new()))
                .collect(),
            SessionSize::Roster(rows) => rows
                .iter()
                .map(|row| (format!("{}({})", self.session_name, row_email(row)), row.clone()))
                .collect(),
        }
    }
}

/// 会话中单个环境的记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEnvironment {
    #[serde(rename = "Session")]
    pub session: Option<String>,

    #[serde(rename = "Id")]
    pub id: String,

    #[serde(rename = "Environment")]
    pub environment: String,

    #[serde(rename = "LongURL")]
    pub long_url: Option<String>,

    #[serde(rename = "ShortURL")]
    pub short_url: Option<String>,

    #[serde(rename = "Password")]
    pub password: Option<String>,
}

impl SessionEnvironment {
    fn from_provisioned(session: Option<String>, env: ProvisionedEnvironment) -> Self {
        Self {
            session,
            id: env.id,
            environment: env.name,
            long_url: env.portal.long_url,
            short_url: env.portal.short_url,
            password: env.portal.share_password,
        }
    }

    fn to_record(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self).map_err(|e| SkytapError::Parse(e.to_string()))? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

/// 新建会话结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    #[serde(rename = "ProjectID")]
    pub project_id: String,

    #[serde(rename = "SessionName")]
    pub session_name: Option<String>,

    #[serde(rename = "TemplateUsed")]
    pub template_used: String,

    /// 环境记录，已合并对应的名单行
    #[serde(rename = "Environments")]
    pub environments: Vec<Map<String, Value>>,
}

/// 会话操作接口
#[async_trait]
pub trait SessionOperations: Send + Sync {
    /// 创建会话：一个项目加若干环境
    async fn new_session(&self, req: &NewSessionRequest) -> Result<SessionResult>;

    /// 删除会话：先删除全部环境，再删除项目
    async fn remove_session(&self, project_id: &str) -> Result<()>;

    /// 启动会话下的全部环境
    async fn start_session(
        &self,
        project_id: &str,
        delay_between: Duration,
        delay_after: Duration,
    ) -> Result<()>;

    /// 停止会话下的全部环境
    async fn stop_session(
        &self,
        project_id: &str,
        delay_between: Duration,
        delay_after: Duration,
    ) -> Result<()>;

    /// 统计会话运行状态
    async fn status_session(&self, project_id: &str) -> Result<SessionStatus>;

    /// 用模板替换环境中的全部虚拟机，并重新授权共享门户
    async fn replace_environment_with_template(
        &self,
        config_id: &str,
        template_id: &str,
    ) -> Result<()>;
}

/// 基于 Skytap 客户端的会话操作实现
pub struct SkytapSessions {
    client: Arc<SkytapClient>,
    shortener: Arc<dyn UrlShortener>,
}

impl SkytapSessions {
    /// 使用客户端令牌（或环境变量）生成 Bitly 短链接
    pub fn new(client: Arc<SkytapClient>) -> Self {
        let shortener = Arc::new(BitlyShortener::for_client(&client));
        Self { client, shortener }
    }

    /// 设置自定义短链接生成器
    pub fn with_shortener(mut self, shortener: Arc<dyn UrlShortener>) -> Self {
        self.shortener = shortener;
        self
    }

    pub fn client(&self) -> &SkytapClient {
        &self.client
    }

    async fn set_session_runstate(
        &self,
        project_id: &str,
        state: Runstate,
        delay_between: Duration,
        delay_after: Duration,
    ) -> Result<()> {
        let envs = self.client.projects().list_configurations(project_id).await?;
        info!("切换会话运行状态: {} -> {} ({} 个环境)", project_id, state, envs.len());

        for env in &envs {
            self.client.configurations().set_runstate(&env.id, state).await?;
            if !delay_between.is_zero() {
                tokio::time::sleep(delay_between).await;
            }
        }

        if !delay_after.is_zero() {
            tokio::time::sleep(delay_after).await;
        }
        Ok(())
    }
}

#[async_trait]
impl SessionOperations for SkytapSessions {
    async fn new_session(&self, req: &NewSessionRequest) -> Result<SessionResult> {
        let plan = req.plan();
        info!(
            "创建会话: {} (模板: {}, 环境: {} 个)",
            req.session_name,
            req.template_id,
            plan.len()
        );

        let project = self.client.projects().create(&req.session_name, "").await?;
        self.client
            .projects()
            .add_template(&project.id, &req.template_id)
            .await?;

        let provisioner = EnvironmentProvisioner::new(&self.client, self.shortener.as_ref())
            .with_power_options_disabled(req.disable_power_options);

        let mut records = Vec::with_capacity(plan.len());
        let mut rows = Vec::with_capacity(plan.len());
        for (env_name, row) in plan {
            let env = provisioner
                .provision(&project.id, &req.template_id, &env_name)
                .await?;
            records.push(SessionEnvironment::from_provisioned(project.name.clone(), env).to_record()?);
            rows.push(row);
        }

        Ok(SessionResult {
            project_id: project.id,
            session_name: project.name,
            template_used: req.template_id.clone(),
            environments: merge_arrays(&records, &rows)?,
        })
    }

    async fn remove_session(&self, project_id: &str) -> Result<()> {
        let envs = self.client.projects().list_configurations(project_id).await?;
        info!("删除会话: {} ({} 个环境)", project_id, envs.len());

        for env in &envs {
            self.client.configurations().delete(&env.id).await?;
        }
        self.client.projects().delete(project_id).await?;
        Ok(())
    }

    async fn start_session(
        &self,
        project_id: &str,
        delay_between: Duration,
        delay_after: Duration,
    ) -> Result<()> {
        self.set_session_runstate(project_id, Runstate::Running, delay_between, delay_after)
            .await
    }

    async fn stop_session(
        &self,
        project_id: &str,
        delay_between: Duration,
        delay_after: Duration,
    ) -> Result<()> {
        self.set_session_runstate(project_id, Runstate::Stopped, delay_between, delay_after)
            .await
    }

    async fn status_session(&self, project_id: &str) -> Result<SessionStatus> {
        let project = self.client.projects().get(project_id).await?;
        let mut status = SessionStatus::new(project.name);

        let envs = self.client.projects().list_configurations(project_id).await?;
        for env in envs {
            let vms = self.client.vms().list(&env.id).await?;
            status.push(EnvironmentStatus::from_vms(env.name, &vms));
        }

        info!(
            "会话状态: {} ({}/{} 个环境运行中)",
            project_id, status.report.running_environments, status.report.total_environments
        );
        Ok(status)
    }

    async fn replace_environment_with_template(
        &self,
        config_id: &str,
        template_id: &str,
    ) -> Result<()> {
        let vms = self.client.vms().list(config_id).await?;
        info!(
            "用模板替换环境: {} <- {} (删除 {} 台虚拟机)",
            config_id,
            template_id,
            vms.len()
        );

        for vm in &vms {
            self.client.vms().delete(config_id, &vm.id).await?;
        }
        self.client
            .configurations()
            .add_template(config_id, template_id)
            .await?;
        self.client
            .publish_sets()
            .update_access(config_id, DEFAULT_ACCESS)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plan_by_count() {
        let req = NewSessionRequest::new("class", "t1", SessionSize::Count(3));
        let names: Vec<String> = req.plan().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["class(000)", "class(001)", "class(002)"]);
    }

    #[test]
    fn test_plan_by_roster() {
        let rows: Vec<RosterRow> = vec![
            json!({"email": "a@x.com"}).as_object().cloned().unwrap(),
            json!({"email": "b@x.com"}).as_object().cloned().unwrap(),
        ];
        let req = NewSessionRequest::new("class", "t1", SessionSize::Roster(rows));
        let plan = req.plan();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].0, "class(a@x.com)");
        assert_eq!(plan[1].1["email"], "b@x.com");
    }

    #[test]
    fn test_session_environment_record_keys() {
        let env = SessionEnvironment {
            session: Some("class".into()),
            id: "c1".into(),
            environment: "class(000)".into(),
            long_url: Some("https://l".into()),
            short_url: Some("https://l".into()),
            password: Some("ABCDEF".into()),
        };
        let record = env.to_record().unwrap();
        for key in ["Session", "Id", "Environment", "LongURL", "ShortURL", "Password"] {
            assert!(record.contains_key(key), "missing {}", key);
        }
    }
}
