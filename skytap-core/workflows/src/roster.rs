//! 学员名单 (CSV)

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::info;

use skytap_client::{Result, SkytapError};

/// 名单中的一行，键为表头
pub type RosterRow = Map<String, Value>;

/// 解析带表头的 CSV 名单
pub fn parse_roster<R: Read>(reader: R) -> Result<Vec<RosterRow>> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader
        .headers()
        .map_err(|e| SkytapError::Config(format!("读取名单表头失败: {}", e)))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| SkytapError::Config(format!("读取名单失败: {}", e)))?;
        let row: RosterRow = headers
            .iter()
            .zip(record.iter())
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// 读取名单文件
pub fn load_roster(path: impl AsRef<Path>) -> Result<Vec<RosterRow>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| SkytapError::Config(format!("无法打开名单文件 {}: {}", path.display(), e)))?;
    let rows = parse_roster(file)?;
    info!("读取名单: {} ({} 行)", path.display(), rows.len());
    Ok(rows)
}

/// 名单行的 email 字段，缺失时为空串
pub fn row_email(row: &RosterRow) -> &str {
    row.get("email").and_then(Value::as_str).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_roster() {
        let csv = "email,first\na@x.com,Ann\nb@x.com,Bob\n";
        let rows = parse_roster(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(row_email(&rows[0]), "a@x.com");
        assert_eq!(rows[1]["first"], "Bob");

        let keys: Vec<&String> = rows[0].keys().collect();
        assert_eq!(keys, ["email", "first"]);
    }

    #[test]
    fn test_row_without_email() {
        let rows = parse_roster("name\nAnn\n".as_bytes()).unwrap();
        assert_eq!(row_email(&rows[0]), "");
    }

    #[test]
    fn test_load_roster() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "email").unwrap();
        writeln!(file, "c@x.com").unwrap();

        let rows = load_roster(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(row_email(&rows[0]), "c@x.com");
    }

    #[test]
    fn test_load_missing_roster() {
        let err = load_roster("/nonexistent/roster.csv").unwrap_err();
        assert!(matches!(err, SkytapError::Config(_)));
    }
}
