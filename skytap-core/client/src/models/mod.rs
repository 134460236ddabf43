//! Skytap 数据模型
//!
//! 所有实体均以远端返回的不透明字符串 ID 标识，数字形式的 ID 会被转换为字符串。
//! 未建模的字段保留在 `extra` 中，调用方拿到的是完整的响应体。

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// 将字符串或数字形式的 ID 统一为字符串
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "无效的 ID: {}",
            other
        ))),
    }
}

/// 布尔字段为 `null` 时按 `false` 处理
pub fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// 从任意 JSON 对象中取出 `id` 字段
pub fn value_id(value: &Value) -> Option<String> {
    match value.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// 项目（会话）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 环境（configuration）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    /// 运行状态，如 `running`、`stopped`、`busy`
    #[serde(default)]
    pub runstate: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Configuration {
    /// 是否处于 `busy` 过渡状态
    pub fn is_busy(&self) -> bool {
        self.runstate
            .as_deref()
            .map(|s| s.starts_with("busy"))
            .unwrap_or(false)
    }
}

/// 虚拟机
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vm {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub runstate: Option<String>,

    /// 是否被限流
    #[serde(default, deserialize_with = "null_as_false")]
    pub rate_limited: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 发布集（共享门户）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishSet {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    /// 门户长链接
    #[serde(default)]
    pub desktops_url: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 标签
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    #[serde(default)]
    pub value: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 运行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Runstate {
    Running,
    Stopped,
    Suspended,
    Halted,
    Reset,
}

impl Runstate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Runstate::Running => "running",
            Runstate::Stopped => "stopped",
            Runstate::Suspended => "suspended",
            Runstate::Halted => "halted",
            Runstate::Reset => "reset",
        }
    }
}

impl std::fmt::Display for Runstate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 发布集类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PublishSetType {
    #[default]
    SingleUrl,
    MultipleUrl,
}

impl PublishSetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishSetType::SingleUrl => "single_url",
            PublishSetType::MultipleUrl => "multiple_url",
        }
    }
}

/// 创建发布集请求
#[derive(Debug, Clone, Serialize)]
pub struct PublishSetRequest {
    pub name: String,

    pub publish_set_type: PublishSetType,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub sso_required: bool,
}

impl PublishSetRequest {
    /// 使用默认名称 `Published set - <type>`
    pub fn new(publish_set_type: PublishSetType) -> Self {
        Self {
            name: format!("Published set - {}", publish_set_type.as_str()),
            publish_set_type,
            sso_required: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_sso(mut self, sso: bool) -> Self {
        self.sso_required = sso;
        self
    }
}

impl Default for PublishSetRequest {
    fn default() -> Self {
        Self::new(PublishSetType::SingleUrl)
    }
}

/// 新建用户请求
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub login_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub account_role: String,
    pub can_import: bool,
    pub can_export: bool,
    pub time_zone: String,
    pub region: String,
}

impl NewUser {
    pub fn new(
        login_name: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            login_name: login_name.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            account_role: "restricted_user".to_string(),
            can_import: false,
            can_export: false,
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            region: "US-West".to_string(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.account_role = role.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }
}

/// Skytap 默认时区
pub const DEFAULT_TIME_ZONE: &str = "Pacific Time (US & Canada)";

/// 计划任务作用对象
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleTarget {
    Configuration(String),
    Template(String),
}

/// 创建计划任务请求
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    pub target: ScheduleTarget,
    pub title: String,
    pub actions: Vec<Value>,
    pub start_at: String,
    pub recurring_days: Option<String>,
    pub end_at: Option<String>,
    pub time_zone: String,
    pub delete_at_end: bool,
}

impl ScheduleRequest {
    pub fn new(
        target: ScheduleTarget,
        title: impl Into<String>,
        actions: Vec<Value>,
        start_at: impl Into<String>,
    ) -> Self {
        Self {
            target,
            title: title.into(),
            actions,
            start_at: start_at.into(),
            recurring_days: None,
            end_at: None,
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            delete_at_end: false,
        }
    }

    pub fn with_recurring_days(mut self, days: impl Into<String>) -> Self {
        self.recurring_days = Some(days.into());
        self
    }

    pub fn with_end_at(mut self, end_at: impl Into<String>, delete_at_end: bool) -> Self {
        self.end_at = Some(end_at.into());
        self.delete_at_end = delete_at_end;
        self
    }

    pub fn with_time_zone(mut self, tz: impl Into<String>) -> Self {
        self.time_zone = tz.into();
        self
    }

    /// 生成请求体
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("title".into(), Value::String(self.title.clone()));
        body.insert("start_at".into(), Value::String(self.start_at.clone()));
        body.insert("time_zone".into(), Value::String(self.time_zone.clone()));
        body.insert("actions".into(), Value::Array(self.actions.clone()));

        match &self.target {
            ScheduleTarget::Configuration(id) => {
                body.insert("configuration_id".into(), Value::String(id.clone()));
            }
            ScheduleTarget::Template(id) => {
                body.insert("template_id".into(), Value::String(id.clone()));
            }
        }
        if let Some(end_at) = &self.end_at {
            body.insert("end_at".into(), Value::String(end_at.clone()));
        }
        if let Some(days) = &self.recurring_days {
            body.insert("recurring_days".into(), Value::String(days.clone()));
        }
        if self.delete_at_end {
            body.insert("delete_at_end".into(), Value::Bool(true));
        }
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_id_is_string() {
        let cfg: Configuration =
            serde_json::from_value(json!({"id": 1234, "name": "env", "runstate": "busy"})).unwrap();
        assert_eq!(cfg.id, "1234");
        assert!(cfg.is_busy());
    }

    #[test]
    fn test_extra_fields_kept() {
        let vm: Vm = serde_json::from_value(json!({
            "id": "v1",
            "runstate": "running",
            "interfaces": [{"id": "nic-1"}]
        }))
        .unwrap();
        assert!(!vm.rate_limited);
        assert!(vm.extra.contains_key("interfaces"));

        let back = serde_json::to_value(&vm).unwrap();
        assert_eq!(back["interfaces"][0]["id"], "nic-1");
    }

    #[test]
    fn test_null_rate_limited() {
        let vms: Vec<Vm> = serde_json::from_value(json!([
            {"id": "v1", "runstate": "running", "rate_limited": null},
            {"id": "v2", "runstate": "running", "rate_limited": true}
        ]))
        .unwrap();
        assert!(!vms[0].rate_limited);
        assert!(vms[1].rate_limited);
    }

    #[test]
    fn test_value_id() {
        assert_eq!(value_id(&json!({"id": "abc"})), Some("abc".to_string()));
        assert_eq!(value_id(&json!({"id": 7})), Some("7".to_string()));
        assert_eq!(value_id(&json!({"name": "x"})), None);
    }

    #[test]
    fn test_publish_set_request_defaults() {
        let body = serde_json::to_value(PublishSetRequest::default()).unwrap();
        assert_eq!(body["name"], "Published set - single_url");
        assert_eq!(body["publish_set_type"], "single_url");
        assert!(body.get("sso_required").is_none());

        let body = serde_json::to_value(PublishSetRequest::default().with_sso(true)).unwrap();
        assert_eq!(body["sso_required"], true);
    }

    #[test]
    fn test_schedule_body() {
        let req = ScheduleRequest::new(
            ScheduleTarget::Template("t1".into()),
            "nightly",
            vec![json!({"type": "suspend", "offset": 0})],
            "2024/01/01 08:00:00",
        )
        .with_end_at("2024/02/01 08:00:00", true);

        let body = req.to_body();
        assert_eq!(body["template_id"], "t1");
        assert!(body.get("configuration_id").is_none());
        assert_eq!(body["time_zone"], DEFAULT_TIME_ZONE);
        assert_eq!(body["delete_at_end"], true);
        assert!(body.get("recurring_days").is_none());
    }
}
