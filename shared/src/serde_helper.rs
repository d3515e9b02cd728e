//! 宽松反序列化工具
//!
//! 后端对数字字段并不统一：有时是 JSON 数字，有时是数字字符串（如 `"1200.50"`）。
//! 这里集中处理这类差异，模型层只需声明 `deserialize_with`。

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Str(String),
}

impl NumberOrString {
    fn into_f64<E: de::Error>(self) -> Result<Option<f64>, E> {
        match self {
            NumberOrString::Int(n) => Ok(Some(n as f64)),
            NumberOrString::Float(n) => Ok(Some(n)),
            NumberOrString::Str(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(None);
                }
                s.parse::<f64>()
                    .map(Some)
                    .map_err(|_| E::custom(format!("invalid number: {s:?}")))
            }
        }
    }
}

/// 数字或数字字符串 -> `f64`；`null` 或空串视为 0
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_f64(deserializer)?.unwrap_or_default())
}

/// 数字或数字字符串 -> `Option<f64>`
pub fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(v) => v.into_f64(),
        None => Ok(None),
    }
}

/// 数字或数字字符串 -> 非负整数（库存、使用次数等计数字段）
pub fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_u64(deserializer)?.unwrap_or_default())
}

pub fn lenient_opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match lenient_opt_f64(deserializer)? {
        None => Ok(None),
        Some(n) if (0.0..u64::MAX as f64).contains(&n) && n.fract() == 0.0 => Ok(Some(n as u64)),
        Some(n) => Err(de::Error::custom(format!("expected a non-negative integer, got {n}"))),
    }
}

// =========================================================
// RecordId
// =========================================================

/// 后端记录主键
///
/// 不同表的主键有的是自增整数，有的是字符串，这里统一按字符串保存。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Int(n) => Ok(Self(n.to_string())),
            NumberOrString::Float(n) => Ok(Self(n.to_string())),
            NumberOrString::Str(s) => Ok(Self(s)),
        }
    }
}
