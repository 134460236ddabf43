//! Skytap 组合流程
//!
//! 在客户端资源操作之上组合出的多步流程：
//!
//! - **共享门户** (`new_sharing_portal`): 创建发布集、授权、设置密码、生成短链接
//! - **培训会话** (`SessionOperations`): 批量创建/删除/启停/统计一个项目下的环境
//! - **环境创建状态机** (`EnvironmentProvisioner`): 单个环境的逐步创建
//!
//! 所有远端调用严格顺序执行，失败时不回滚已完成的步骤。

pub mod portal;
pub mod provision;
pub mod roster;
pub mod session;
pub mod status;

pub use portal::{new_sharing_portal, SharingPortal};
pub use provision::{EnvironmentProvisioner, ProvisionState, ProvisionedEnvironment};
pub use roster::{load_roster, parse_roster, RosterRow};
pub use session::{
    NewSessionRequest, SessionEnvironment, SessionOperations, SessionResult, SessionSize,
    SkytapSessions,
};
pub use status::{EnvironmentStatus, SessionReport, SessionStatus, VmBucket};
