//! Skytap 云平台客户端
//!
//! 提供与 Skytap REST API 交互的客户端实现。
//!
//! # 功能
//!
//! - **项目管理** (`ProjectApi`): 创建、删除项目，向项目添加环境/模板/用户
//! - **环境管理** (`ConfigurationApi`): 从模板创建、复制、改名、启停、删除
//! - **虚拟机管理** (`VmApi`): 查询、编辑、启停、userdata
//! - **网络管理** (`NetworkApi`): 子网、网卡、隧道、WAN、公网 IP
//! - **标签管理** (`TagApi`): 添加标签，逐个删除并容忍单项失败
//! - **发布集管理** (`PublishSetApi`): 创建共享门户、设置访问权限和密码
//! - **报表** (`ReportApi`): 用量/审计报表的创建与轮询
//! - **账号管理** (`UserApi`, `GroupApi`, `DepartmentApi`)
//! - **公网 IP** (`IpApi`) 与 **虚拟机元数据** (`MetadataApi`)
//!
//! # 示例
//!
//! ```ignore
//! use skytap_client::{Credentials, SkytapClient, SkytapConfig, DEFAULT_BASE_URL};
//!
//! let mut client = SkytapClient::new(DEFAULT_BASE_URL, SkytapConfig::default())?;
//! client.authorize(&Credentials::from_env_file(".env")?);
//!
//! // 创建项目并从模板创建环境
//! let project = client.projects().create("training", "").await?;
//! let env = client.configurations().create_from_template("123").await?;
//! client.projects().add_configuration(&project.id, &env.id).await?;
//!
//! // 删除环境上的全部标签
//! let results = client.tags().remove(&env.id, "all").await?;
//! ```

pub mod api;
pub mod client;
pub mod credentials;
pub mod error;
pub mod models;
pub mod shortener;
pub mod util;

pub use client::{SkytapClient, SkytapConfig, DEFAULT_BASE_URL};
pub use credentials::Credentials;
pub use error::{FailureInfo, Result, SkytapError};

// 导出 API 模块
pub use api::{
    AuditQuery, ConfigurationApi, DepartmentApi, GroupApi, IpApi, MetadataApi, NetworkApi,
    ProjectApi, PublishSetApi, ReportApi, ReportJob, ReportOutcome, ReportStatus, ScheduleApi,
    TagApi, TagOwner, TagTarget, TemplateApi, UsageQuery, UserApi, VmApi,
};

// 导出数据模型
pub use models::{
    Configuration, NewUser, Project, PublishSet, PublishSetRequest, PublishSetType, Runstate,
    ScheduleRequest, ScheduleTarget, Tag, Vm,
};

pub use shortener::{BitlyShortener, UrlShortener};
pub use util::{merge_arrays, share_password};
