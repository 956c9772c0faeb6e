//! 后端行数据的宽松反序列化辅助函数
//!
//! 表 API 返回的列可能为 `null`，主键可能是整数也可能是 uuid 字符串。

use serde::{Deserialize, Deserializer, de::Error};
use serde_json::Value;

/// `null` 反序列化为空字符串，数字转换为其十进制文本
pub fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected string, got {}", other))),
    }
}

/// 主键：接受字符串或整数，拒绝 `null`
pub fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("invalid id: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "id_string")]
        id: String,
        #[serde(default, deserialize_with = "nullable_string")]
        note: String,
    }

    #[test]
    fn numeric_ids_become_text() {
        let row: Row = serde_json::from_value(json!({ "id": 42, "note": null })).unwrap();
        assert_eq!(row.id, "42");
        assert_eq!(row.note, "");
    }

    #[test]
    fn null_id_is_rejected() {
        let row = serde_json::from_value::<Row>(json!({ "id": null }));
        assert!(row.is_err());
    }
}
