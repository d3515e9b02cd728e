use crate::notice::Notice;
use crate::request::{HttpResponse, TransportError};
use gemadmin_shared::ErrorBody;
use std::fmt;

// =========================================================
// 错误分类
// =========================================================

/// 失败请求的分类，决定网关产生哪一类副作用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// 401: 凭据失效
    Unauthorized,
    /// 403: 权限不足
    Forbidden,
    /// 5xx: 服务端故障
    ServerError,
    /// 超时未收到响应
    Timeout,
    /// 其他 4xx、网络失败等，由调用方自行处理
    Other,
}

impl ErrorClass {
    /// 每个分类最多对应一条提示
    pub fn notice(&self) -> Option<Notice> {
        match self {
            ErrorClass::Unauthorized => Some(Notice::SessionExpired),
            ErrorClass::Forbidden => Some(Notice::PermissionDenied),
            ErrorClass::ServerError => Some(Notice::ServerError),
            ErrorClass::Timeout => Some(Notice::Timeout),
            ErrorClass::Other => None,
        }
    }
}

/// 失败的原始原因
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// 收到了非 2xx 响应
    Status(HttpResponse),
    /// 没有收到响应
    Transport(TransportError),
}

/// 纯函数，不产生副作用
pub fn classify(failure: &Failure) -> ErrorClass {
    match failure {
        Failure::Status(resp) => match resp.status {
            401 => ErrorClass::Unauthorized,
            403 => ErrorClass::Forbidden,
            s if s >= 500 => ErrorClass::ServerError,
            _ => ErrorClass::Other,
        },
        Failure::Transport(TransportError::Timeout(_)) => ErrorClass::Timeout,
        Failure::Transport(_) => ErrorClass::Other,
    }
}

// =========================================================
// 网关错误
// =========================================================

/// 网关返回给调用方的错误，保留原始状态码与响应体
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayError {
    pub class: ErrorClass,
    pub failure: Failure,
}

impl GatewayError {
    pub fn new(failure: Failure) -> Self {
        Self {
            class: classify(&failure),
            failure,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match &self.failure {
            Failure::Status(resp) => Some(resp.status),
            Failure::Transport(_) => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match &self.failure {
            Failure::Status(resp) => Some(resp.body.as_str()),
            Failure::Transport(_) => None,
        }
    }

    /// 后端错误体中的 `message` 字段
    pub fn server_message(&self) -> Option<String> {
        let Failure::Status(resp) = &self.failure else {
            return None;
        };
        resp.json::<ErrorBody>()
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            Failure::Status(resp) => {
                write!(f, "request failed with status {}", resp.status)?;
                if let Some(msg) = self.server_message() {
                    write!(f, ": {msg}")?;
                }
                Ok(())
            }
            Failure::Transport(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for GatewayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.failure {
            Failure::Transport(e) => Some(e),
            Failure::Status(_) => None,
        }
    }
}

// =========================================================
// 业务层错误
// =========================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("unexpected response shape: {0}")]
    Decode(#[source] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid record id: {0:?}")]
    InvalidId(String),
}

impl ApiError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ApiError::Gateway(e) => e.class,
            ApiError::Encode(_)
            | ApiError::Decode(_)
            | ApiError::Store(_)
            | ApiError::InvalidId(_) => ErrorClass::Other,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Gateway(e) => e.status(),
            _ => None,
        }
    }

    /// 页面上展示的错误文字：优先使用后端消息
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Gateway(e) => e.server_message().unwrap_or_else(|| fallback.to_string()),
            _ => fallback.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("credential store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize credential: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn status(code: u16, body: &str) -> Failure {
        Failure::Status(HttpResponse::new(code, body))
    }

    #[test]
    fn classifies_statuses() {
        assert_eq!(classify(&status(401, "")), ErrorClass::Unauthorized);
        assert_eq!(classify(&status(403, "")), ErrorClass::Forbidden);
        assert_eq!(classify(&status(500, "")), ErrorClass::ServerError);
        assert_eq!(classify(&status(503, "")), ErrorClass::ServerError);
        assert_eq!(classify(&status(400, "")), ErrorClass::Other);
        assert_eq!(classify(&status(404, "")), ErrorClass::Other);
        assert_eq!(classify(&status(422, "")), ErrorClass::Other);
    }

    #[test]
    fn classifies_transport_failures() {
        let timeout = Failure::Transport(TransportError::Timeout(Duration::from_secs(10)));
        assert_eq!(classify(&timeout), ErrorClass::Timeout);

        let refused = Failure::Transport(TransportError::Network("connection refused".into()));
        assert_eq!(classify(&refused), ErrorClass::Other);
    }

    #[test]
    fn one_notice_per_class() {
        assert_eq!(ErrorClass::Unauthorized.notice(), Some(Notice::SessionExpired));
        assert_eq!(ErrorClass::Forbidden.notice(), Some(Notice::PermissionDenied));
        assert_eq!(ErrorClass::ServerError.notice(), Some(Notice::ServerError));
        assert_eq!(ErrorClass::Timeout.notice(), Some(Notice::Timeout));
        assert_eq!(ErrorClass::Other.notice(), None);
    }

    #[test]
    fn gateway_error_keeps_status_and_body() {
        let err = GatewayError::new(status(400, r#"{"message":"Promo code already exists"}"#));
        assert_eq!(err.class, ErrorClass::Other);
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.body(), Some(r#"{"message":"Promo code already exists"}"#));
        assert_eq!(err.server_message().as_deref(), Some("Promo code already exists"));
        assert_eq!(
            err.to_string(),
            "request failed with status 400: Promo code already exists"
        );
    }

    #[test]
    fn display_message_falls_back() {
        let with_msg = ApiError::from(GatewayError::new(status(409, r#"{"message":"Email taken"}"#)));
        assert_eq!(with_msg.display_message("Failed to create admin"), "Email taken");

        let html = ApiError::from(GatewayError::new(status(502, "<html>Bad Gateway</html>")));
        assert_eq!(html.display_message("Failed to load orders"), "Failed to load orders");

        let decode = ApiError::Decode(serde_json::from_str::<u8>("x").unwrap_err());
        assert_eq!(decode.display_message("Failed"), "Failed");
        assert_eq!(decode.class(), ErrorClass::Other);
    }
}
