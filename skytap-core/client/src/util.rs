//! 工具函数

use rand::seq::SliceRandom;
use serde_json::{Map, Value};

use crate::error::{Result, SkytapError};

/// 共享密码字符集（去掉了易混淆的 I、L）
const SHARE_PASSWORD_CHARS: &[u8] = b"ABCDEFGHJKMNOPQRSTUVWXYZ";

/// 默认共享密码长度
pub const SHARE_PASSWORD_LEN: usize = 6;

/// 生成随机共享密码
pub fn share_password(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .filter_map(|_| SHARE_PASSWORD_CHARS.choose(&mut rng))
        .map(|&c| char::from(c))
        .collect()
}

/// 按位置合并两组记录，同名字段以第二组为准
///
/// # Example
/// ```
/// use serde_json::json;
/// let a = vec![json!({"a": 1}).as_object().unwrap().clone()];
/// let b = vec![json!({"b": 2}).as_object().unwrap().clone()];
/// let merged = skytap_client::util::merge_arrays(&a, &b).unwrap();
/// assert_eq!(serde_json::Value::Object(merged[0].clone()), json!({"a": 1, "b": 2}));
/// ```
pub fn merge_arrays(
    first: &[Map<String, Value>],
    second: &[Map<String, Value>],
) -> Result<Vec<Map<String, Value>>> {
    if first.len() != second.len() {
        return Err(SkytapError::Config(format!(
            "数组长度不一致: {} != {}",
            first.len(),
            second.len()
        )));
    }

    Ok(first
        .iter()
        .zip(second)
        .map(|(a, b)| {
            let mut merged = a.clone();
            merged.extend(b.iter().map(|(k, v)| (k.clone(), v.clone())));
            merged
        })
        .collect())
}
