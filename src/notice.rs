use tracing::warn;

/// 网关在失败时向用户展示的提示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    SessionExpired,
    PermissionDenied,
    ServerError,
    Timeout,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::SessionExpired => "Session expired. Please login again.",
            Notice::PermissionDenied => "Access denied. Insufficient permissions.",
            Notice::ServerError => "Server error. Please try again later.",
            Notice::Timeout => "Request timeout. Please check your connection.",
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// 提示的展示方式由调用方注入
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// 控制台下的 "toast"：输出一条 warn 日志
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        warn!(notice = ?notice, "{}", notice.message());
    }
}

#[cfg(test)]
pub use recording::RecordingNotifier;
