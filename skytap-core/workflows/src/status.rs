//! 会话运行状态统计

use serde::{Deserialize, Serialize};

use skytap_client::Vm;

/// 虚拟机运行状态分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmBucket {
    Running,
    Busy,
    /// `stopped*` 与 `suspended*`
    Stopped,
}

impl VmBucket {
    /// 按前缀分类，未知状态不计入任何分类
    pub fn classify(runstate: &str) -> Option<Self> {
        if runstate.starts_with("running") {
            Some(VmBucket::Running)
        } else if runstate.starts_with("busy") {
            Some(VmBucket::Busy)
        } else if runstate.starts_with("stopped") || runstate.starts_with("suspended") {
            Some(VmBucket::Stopped)
        } else {
            None
        }
    }
}

/// 单个环境的状态
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentStatus {
    #[serde(rename = "EnvironmentName")]
    pub environment_name: Option<String>,

    #[serde(rename = "StoppedVMs")]
    pub stopped_vms: usize,

    #[serde(rename = "RunningVMs")]
    pub running_vms: usize,

    #[serde(rename = "BusyVMs")]
    pub busy_vms: usize,

    #[serde(rename = "RateLimited")]
    pub rate_limited: bool,

    #[serde(skip)]
    pub total_vms: usize,
}

impl EnvironmentStatus {
    /// 统计环境下的虚拟机
    pub fn from_vms(environment_name: Option<String>, vms: &[Vm]) -> Self {
        let mut status = Self {
            environment_name,
            total_vms: vms.len(),
            ..Default::default()
        };

        for vm in vms {
            status.rate_limited |= vm.rate_limited;
            match vm.runstate.as_deref().and_then(VmBucket::classify) {
                Some(VmBucket::Running) => status.running_vms += 1,
                Some(VmBucket::Busy) => status.busy_vms += 1,
                Some(VmBucket::Stopped) => status.stopped_vms += 1,
                None => {}
            }
        }
        status
    }

    /// 全部虚拟机都在运行（没有虚拟机时也算运行）
    pub fn is_running(&self) -> bool {
        self.running_vms == self.total_vms
    }
}

/// 会话汇总
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    #[serde(rename = "SessionName")]
    pub session_name: Option<String>,

    #[serde(rename = "TotalEnvironments")]
    pub total_environments: usize,

    #[serde(rename = "RunningEnvironments")]
    pub running_environments: usize,
}

/// 会话状态
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub report: SessionReport,
    pub environments: Vec<EnvironmentStatus>,
}

impl SessionStatus {
    pub fn new(session_name: Option<String>) -> Self {
        Self {
            report: SessionReport {
                session_name,
                ..Default::default()
            },
            environments: Vec::new(),
        }
    }

    /// 追加一个环境并更新汇总
    pub fn push(&mut self, env: EnvironmentStatus) {
        self.report.total_environments += 1;
        if env.is_running() {
            self.report.running_environments += 1;
        }
        self.environments.push(env);
    }
}
