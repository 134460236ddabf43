//! Skytap 客户端错误定义

use serde::Serialize;
use thiserror::Error;

/// Skytap 客户端错误类型
#[derive(Error, Debug)]
pub enum SkytapError {
    /// 远端返回非 2xx 响应
    #[error("API 错误 [{status} {reason}] {method}: {body}")]
    Request {
        status: u16,
        reason: String,
        body: String,
        method: String,
    },

    #[error("HTTP 错误: {0}")]
    Http(String),

    #[error("解析错误: {0}")]
    Parse(String),

    /// 调用方配置错误，不会重试
    #[error("配置错误: {0}")]
    Config(String),
}

/// Skytap 客户端结果类型
pub type Result<T> = std::result::Result<T, SkytapError>;

/// 请求失败的结构化描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureInfo {
    /// HTTP 状态码，非 HTTP 失败时为 -1
    pub request_result_code: i32,
    #[serde(rename = "eDescription")]
    pub e_description: String,
    #[serde(rename = "eMessage")]
    pub e_message: String,
    pub method: String,
}

impl SkytapError {
    /// 是否为远端返回的非 2xx 失败
    pub fn is_request_failure(&self) -> bool {
        matches!(self, SkytapError::Request { .. })
    }

    /// 远端状态码
    pub fn status(&self) -> Option<u16> {
        match self {
            SkytapError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 生成结构化的失败信息
    pub fn failure_info(&self) -> FailureInfo {
        match self {
            SkytapError::Request {
                status,
                reason,
                body,
                method,
            } => FailureInfo {
                request_result_code: i32::from(*status),
                e_description: reason.clone(),
                e_message: body.clone(),
                method: method.clone(),
            },
            other => FailureInfo {
                request_result_code: -1,
                e_description: other.kind().to_string(),
                e_message: other.to_string(),
                method: String::new(),
            },
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            SkytapError::Request { .. } => "Request",
            SkytapError::Http(_) => "Http",
            SkytapError::Parse(_) => "Parse",
            SkytapError::Config(_) => "Config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failure_info() {
        let err = SkytapError::Request {
            status: 404,
            reason: "Not Found".to_string(),
            body: "{\"error\":\"missing\"}".to_string(),
            method: "GET".to_string(),
        };

        let info = err.failure_info();
        assert_eq!(info.request_result_code, 404);
        assert_eq!(info.e_description, "Not Found");
        assert_eq!(info.method, "GET");
        assert!(err.is_request_failure());
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_non_http_failure_info() {
        let err = SkytapError::Config("缺少用户名".to_string());
        let info = err.failure_info();
        assert_eq!(info.request_result_code, -1);
        assert_eq!(info.e_description, "Config");
        assert!(info.e_message.contains("缺少用户名"));
        assert!(info.method.is_empty());
    }

    #[test]
    fn test_failure_info_serialization() {
        let info = SkytapError::Http("connection refused".into()).failure_info();
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["requestResultCode"], -1);
        assert!(json.get("eDescription").is_some());
        assert!(json.get("eMessage").is_some());
    }
}
