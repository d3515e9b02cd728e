//! 运行时配置
//!
//! 从环境变量读取，读不到时使用默认值。

use std::time::Duration;

// =========================================================
// 默认值
// =========================================================

/// 未配置 `ADMIN_API_URL` 时使用的后端地址
pub const DEFAULT_API_URL: &str = "http://localhost:9000";
/// 单次请求超时
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_API_URL: &str = "ADMIN_API_URL";
pub const ENV_TIMEOUT_MS: &str = "ADMIN_API_TIMEOUT_MS";

/// 网关配置，构造后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    base_url: String,
    timeout: Duration,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 从进程环境变量读取
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 从任意变量来源读取（测试时可注入）
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_API_URL)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout = lookup(ENV_TIMEOUT_MS)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TIMEOUT);

        Self::new(base_url).with_timeout(timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 拼接完整 URL，保证中间只有一个 `/`
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn falls_back_to_defaults() {
        let config = GatewayConfig::from_lookup(lookup(&[]));
        assert_eq!(config.base_url(), DEFAULT_API_URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn reads_overrides() {
        let config = GatewayConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://api.shop.test/"),
            (ENV_TIMEOUT_MS, "2500"),
        ]));
        assert_eq!(config.base_url(), "https://api.shop.test");
        assert_eq!(config.timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn ignores_invalid_values() {
        let config = GatewayConfig::from_lookup(lookup(&[(ENV_API_URL, "  "), (ENV_TIMEOUT_MS, "0")]));
        assert_eq!(config.base_url(), DEFAULT_API_URL);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);

        let config = GatewayConfig::from_lookup(lookup(&[(ENV_TIMEOUT_MS, "soon")]));
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn joins_paths() {
        let config = GatewayConfig::new("http://localhost:9000/");
        assert_eq!(config.url("/orders/all"), "http://localhost:9000/orders/all");
        assert_eq!(config.url("orders/all"), "http://localhost:9000/orders/all");
    }
}
