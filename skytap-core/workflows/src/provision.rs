//! 单个环境的创建状态机
//!
//! `Requested → Created → Renamed → (PowerOptionsDisabled) → Linked → Published → Ready`
//!
//! 任一步失败即中止该环境，已完成的步骤保留在远端，日志记录失败时到达的状态。

use std::fmt;

use tracing::{debug, info, warn};

use skytap_client::{util, Result, SkytapClient, UrlShortener};

use crate::portal::{new_sharing_portal, SharingPortal};

/// 环境创建进度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionState {
    /// 尚未发出任何请求
    Requested,
    /// 已从模板创建
    Created,
    Renamed,
    /// 已清除空闲挂起/关机设置
    PowerOptionsDisabled,
    /// 已加入项目
    Linked,
    /// 已创建共享门户
    Published,
    /// 环境已离开 busy 状态
    Ready,
}

impl ProvisionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProvisionState::Requested => "requested",
            ProvisionState::Created => "created",
            ProvisionState::Renamed => "renamed",
            ProvisionState::PowerOptionsDisabled => "power_options_disabled",
            ProvisionState::Linked => "linked",
            ProvisionState::Published => "published",
            ProvisionState::Ready => "ready",
        }
    }
}

impl fmt::Display for ProvisionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 创建完成的环境
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedEnvironment {
    pub id: String,
    pub name: String,
    pub portal: SharingPortal,
}

/// 环境创建器
pub struct EnvironmentProvisioner<'a> {
    client: &'a SkytapClient,
    shortener: &'a dyn UrlShortener,
    disable_power_options: bool,
}

impl<'a> EnvironmentProvisioner<'a> {
    pub fn new(client: &'a SkytapClient, shortener: &'a dyn UrlShortener) -> Self {
        Self {
            client,
            shortener,
            disable_power_options: false,
        }
    }

    /// 创建后清除空闲挂起/关机设置
    pub fn with_power_options_disabled(mut self, disable: bool) -> Self {
        self.disable_power_options = disable;
        self
    }

    /// 从模板创建环境并加入项目
    pub async fn provision(
        &self,
        project_id: &str,
        template_id: &str,
        env_name: &str,
    ) -> Result<ProvisionedEnvironment> {
        let mut state = ProvisionState::Requested;
        match self
            .run(&mut state, project_id, template_id, env_name)
            .await
        {
            Ok(env) => {
                info!("环境创建完成: {} ({})", env.name, env.id);
                Ok(env)
            }
            Err(e) => {
                warn!("环境创建失败: {} (已到达状态: {}) - {}", env_name, state, e);
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        state: &mut ProvisionState,
        project_id: &str,
        template_id: &str,
        env_name: &str,
    ) -> Result<ProvisionedEnvironment> {
        let configurations = self.client.configurations();

        let env = configurations.create_from_template(template_id).await?;
        *state = ProvisionState::Created;

        let env = configurations.rename(&env.id, env_name).await?;
        *state = ProvisionState::Renamed;

        if self.disable_power_options {
            configurations.disable_power_options(&env.id).await?;
            *state = ProvisionState::PowerOptionsDisabled;
        }

        self.client
            .projects()
            .add_configuration(project_id, &env.id)
            .await?;
        *state = ProvisionState::Linked;

        let password = util::share_password(util::SHARE_PASSWORD_LEN);
        let portal =
            new_sharing_portal(self.client, self.shortener, &env.id, Some(password.as_str()))
                .await?;
        *state = ProvisionState::Published;

        self.wait_until_ready(&env.id).await?;
        *state = ProvisionState::Ready;

        Ok(ProvisionedEnvironment {
            id: env.id,
            name: env_name.to_string(),
            portal,
        })
    }

    /// 轮询直到环境不再处于 busy 状态
    async fn wait_until_ready(&self, config_id: &str) -> Result<()> {
        let interval = self.client.config().poll_interval;
        loop {
            let env = self.client.configurations().get(config_id).await?;
            if !env.is_busy() {
                return Ok(());
            }
            debug!("环境仍处于 busy 状态, {:?} 后重试: {}", interval, config_id);
            tokio::time::sleep(interval).await;
        }
    }
}
