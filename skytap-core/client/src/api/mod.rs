//! Skytap API 模块
//!
//! 每个资源一个 API 结构体，每个方法只发出一次请求：
//! - 项目管理 (ProjectApi)
//! - 环境管理 (ConfigurationApi)
//! - 虚拟机管理 (VmApi)
//! - 网络管理 (NetworkApi)
//! - 模板管理 (TemplateApi)
//! - 标签管理 (TagApi)
//! - 计划任务 (ScheduleApi)
//! - 用量/审计报表 (ReportApi)
//! - 发布集 (PublishSetApi)
//! - 用户/用户组/部门 (UserApi, GroupApi, DepartmentApi)
//! - 公网 IP (IpApi)
//! - 虚拟机元数据 (MetadataApi)

pub mod configuration;
pub mod department;
pub mod group;
pub mod ip;
pub mod metadata;
pub mod network;
pub mod project;
pub mod publish_set;
pub mod report;
pub mod schedule;
pub mod tag;
pub mod template;
pub mod user;
pub mod vm;

pub use configuration::ConfigurationApi;
pub use department::DepartmentApi;
pub use group::GroupApi;
pub use ip::IpApi;
pub use metadata::MetadataApi;
pub use network::NetworkApi;
pub use project::ProjectApi;
pub use publish_set::PublishSetApi;
pub use report::{AuditQuery, ReportApi, ReportJob, ReportOutcome, ReportStatus, UsageQuery};
pub use schedule::ScheduleApi;
pub use tag::{TagApi, TagOwner, TagTarget};
pub use template::TemplateApi;
pub use user::UserApi;
pub use vm::VmApi;
