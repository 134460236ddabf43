//! CLI 命令处理模块

pub mod common; // 公共工具函数
pub mod config;
pub mod ip;
pub mod output;
pub mod portal;
pub mod report;
pub mod session;
pub mod tag;
