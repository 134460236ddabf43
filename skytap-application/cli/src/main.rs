//! Skytap CLI 应用

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

mod commands;
mod config;
mod logging;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "skytap")]
#[command(about = "Skytap - 培训环境批量管理工具", long_about = None)]
#[command(version)]
struct Cli {
    /// 日志级别
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// 凭据文件 (覆盖配置文件中的 env_file)
    #[arg(long, global = true)]
    env_file: Option<String>,

    /// Skytap API 地址 (覆盖配置文件中的 base_url)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 培训会话管理
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// 共享门户
    Portal {
        #[command(subcommand)]
        action: PortalAction,
    },

    /// 用量/审计报表
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// 标签管理
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },

    /// 公网 IP
    Ip {
        #[command(subcommand)]
        action: IpAction,
    },

    /// CLI 配置
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// 创建会话
    New {
        /// 会话名称
        name: String,

        /// 模板 ID (默认使用配置文件中的 default_template)
        #[arg(short, long)]
        template: Option<String>,

        /// 环境数量
        #[arg(short, long, conflicts_with = "roster", required_unless_present = "roster")]
        count: Option<usize>,

        /// 学员名单 CSV (需包含 email 列)
        #[arg(short, long, conflicts_with = "count")]
        roster: Option<String>,

        /// 清除空闲挂起/关机设置
        #[arg(long)]
        disable_power_options: bool,
    },

    /// 删除会话及其全部环境
    Remove {
        /// 项目 ID
        project_id: String,
    },

    /// 启动会话下的全部环境
    Start {
        /// 项目 ID
        project_id: String,

        /// 每个环境之间的等待时间（秒）
        #[arg(long, default_value = "0")]
        delay_between: u64,

        /// 全部启动后的等待时间（秒）
        #[arg(long, default_value = "0")]
        delay_after: u64,
    },

    /// 停止会话下的全部环境
    Stop {
        /// 项目 ID
        project_id: String,

        /// 每个环境之间的等待时间（秒）
        #[arg(long, default_value = "0")]
        delay_between: u64,

        /// 全部停止后的等待时间（秒）
        #[arg(long, default_value = "0")]
        delay_after: u64,
    },

    /// 查看会话运行状态
    Status {
        /// 项目 ID
        project_id: String,

        /// 输出格式 (table/json)
        #[arg(short = 'f', long, default_value = "table")]
        format: String,
    },

    /// 用模板替换环境中的虚拟机
    Replace {
        /// 环境 ID
        env_id: String,

        /// 模板 ID
        template_id: String,
    },
}

#[derive(Subcommand)]
pub enum PortalAction {
    /// 为环境创建共享门户
    New {
        /// 环境 ID
        env_id: String,

        /// 门户密码
        #[arg(short, long, conflicts_with = "generate_password")]
        password: Option<String>,

        /// 自动生成 6 位密码
        #[arg(short, long)]
        generate_password: bool,
    },
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// 用量报表
    Usage {
        /// 已创建的报表 ID (不指定则新建)
        #[arg(long)]
        id: Option<String>,

        /// 开始日期
        #[arg(long)]
        start: Option<String>,

        /// 结束日期
        #[arg(long)]
        end: Option<String>,

        /// 资源类型
        #[arg(long, default_value = "svms")]
        resource_type: String,

        /// 区域
        #[arg(long, default_value = "all")]
        region: String,

        /// 等待报表就绪并输出 CSV
        #[arg(short, long)]
        wait: bool,

        /// CSV 输出文件
        #[arg(short, long)]
        output: Option<String>,
    },

    /// 审计报表
    Audit {
        /// 已创建的报表 ID (不指定则新建)
        #[arg(long)]
        id: Option<String>,

        /// 开始时间 (YYYY-MM-DD HH:MM)
        #[arg(long)]
        start: Option<String>,

        /// 结束时间 (YYYY-MM-DD HH:MM)
        #[arg(long)]
        end: Option<String>,

        /// 操作类型过滤
        #[arg(long, default_value = "")]
        activity: String,

        /// 等待报表就绪并输出 CSV
        #[arg(short, long)]
        wait: bool,

        /// CSV 输出文件
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TagAction {
    /// 删除环境标签 (tag 为 all 时删除全部)
    Remove {
        /// 环境 ID
        config_id: String,

        /// 标签 ID 或 all
        tag: String,
    },
}

#[derive(Subcommand)]
pub enum IpAction {
    /// 列出未绑定的公网 IP
    Unassigned {
        /// 区域过滤
        #[arg(short, long)]
        region: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// 显示当前配置
    Show,

    /// 生成默认配置文件
    Init {
        /// 默认模板 ID
        #[arg(short, long)]
        template: Option<String>,

        /// 覆盖已存在的配置文件
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load()?;
    if let Some(env_file) = cli.env_file {
        config.env_file = env_file;
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    // 初始化日志，guard 存活到 main 返回
    let _guard = logging::init(&cli.log_level, &config.log_file)?;

    info!("Skytap CLI 启动");

    // 处理命令
    match cli.command {
        Commands::Session { action } => commands::session::handle(action, &config).await?,
        Commands::Portal { action } => commands::portal::handle(action, &config).await?,
        Commands::Report { action } => commands::report::handle(action, &config).await?,
        Commands::Tag { action } => commands::tag::handle(action, &config).await?,
        Commands::Ip { action } => commands::ip::handle(action, &config).await?,
        Commands::Config { action } => commands::config::handle(action, &config)?,
    }

    Ok(())
}
