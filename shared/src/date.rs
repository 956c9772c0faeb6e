use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// 界面统一使用的日期格式（pt-BR）
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y, %H:%M";

/// 解析后端返回的时间戳
///
/// 带时区的 RFC 3339 优先；不带时区的按 UTC 处理。
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

/// 按给定时区偏移（东正，分钟）格式化；无法解析时原样返回
pub fn format_timestamp(raw: &str, offset_minutes: i32) -> String {
    let Some(parsed) = parse_timestamp(raw) else {
        return raw.to_string();
    };
    match FixedOffset::east_opt(offset_minutes * 60) {
        Some(offset) => parsed.with_timezone(&offset).format(DISPLAY_FORMAT).to_string(),
        None => parsed.format(DISPLAY_FORMAT).to_string(),
    }
}
