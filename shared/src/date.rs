//! 时间字段解析
//!
//! 后端返回的时间格式不统一：
//! - RFC 3339（`2024-05-01T10:00:00.000Z`）
//! - MySQL 风格（`2024-05-01 10:00:00`）
//! - 纯日期（`2024-05-01`，广告与促销的起止日期）
//! - 毫秒时间戳（JSON 整数）
//!
//! 无法识别的值解析为 `None`，不让单个坏字段拖垮整个列表。

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// 时间字段的原始 JSON 形态
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTime {
    Millis(i64),
    Text(String),
    Other(IgnoredAny),
}

/// 按上述格式依次尝试解析
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `deserialize_with` 适配器
pub fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Option::<RawTime>::deserialize(deserializer)? {
        Some(RawTime::Millis(ms)) => DateTime::from_timestamp_millis(ms),
        Some(RawTime::Text(raw)) => parse_datetime(&raw),
        Some(RawTime::Other(_)) | None => None,
    };
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_known_formats() {
        let rfc = parse_datetime("2024-05-01T10:30:00.000Z").unwrap();
        assert_eq!((rfc.month(), rfc.hour(), rfc.minute()), (5, 10, 30));

        let mysql = parse_datetime("2024-05-01 10:30:00").unwrap();
        assert_eq!(mysql, rfc);

        let date = parse_datetime("2024-12-31").unwrap();
        assert_eq!((date.year(), date.month(), date.day(), date.hour()), (2024, 12, 31, 0));
    }

    #[test]
    fn unknown_formats_are_none() {
        assert!(parse_datetime("").is_none());
        assert!(parse_datetime("yesterday").is_none());
        assert!(parse_datetime("31/12/2024").is_none());
    }

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "lenient_datetime")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn lenient_field_accepts_millis_and_drops_junk() {
        let rows: Vec<Row> = serde_json::from_value(serde_json::json!([
            { "at": 1717200000000_i64 },
            { "at": "2024-06-01 00:00:00" },
            { "at": 12.5 },
            { "at": { "seconds": 1 } },
            { "at": [1, 2] },
            { "at": true },
            { "at": null },
            {}
        ]))
        .unwrap();

        let expected = parse_datetime("2024-06-01T00:00:00Z");
        assert_eq!(rows[0].at, expected);
        assert_eq!(rows[1].at, expected);
        assert!(rows[2..].iter().all(|r| r.at.is_none()));
    }
}
