//! HTTP 网关
//!
//! 所有业务模块访问后端的唯一入口：
//! 统一附加 bearer token、统一超时、统一对失败分类并产生副作用。
//! 成功响应原样返回，由各业务模块自行解释。

use crate::config::GatewayConfig;
use crate::error::{ErrorClass, Failure, GatewayError};
use crate::notice::Notifier;
use crate::request::{
    HttpClient, HttpRequest, HttpResponse, MultipartForm, RequestBody, TransportError,
    UploadProgressFn,
};
use crate::route::LOGIN_PATH;
use crate::router::Redirector;
use crate::storage::CredentialStore;
use gemadmin_shared::HttpMethod;
use std::rc::Rc;
use tracing::{debug, warn};

const JSON_CONTENT_TYPE: &str = "application/json";

// =========================================================
// 单次调用描述
// =========================================================

/// 一次调用：方法、相对路径、可选请求体与上传进度回调
#[derive(Clone)]
pub struct Call {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<RequestBody>,
    pub upload_progress: Option<UploadProgressFn>,
}

impl Call {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            upload_progress: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn json(mut self, value: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(value));
        self
    }

    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    pub fn on_upload_progress(mut self, callback: UploadProgressFn) -> Self {
        self.upload_progress = Some(callback);
        self
    }
}

// =========================================================
// 网关
// =========================================================

pub struct Gateway<C: HttpClient> {
    config: GatewayConfig,
    client: C,
    store: Rc<dyn CredentialStore>,
    notifier: Rc<dyn Notifier>,
    redirector: Rc<dyn Redirector>,
}

impl<C: HttpClient> Gateway<C> {
    pub fn new(
        config: GatewayConfig,
        client: C,
        store: Rc<dyn CredentialStore>,
        notifier: Rc<dyn Notifier>,
        redirector: Rc<dyn Redirector>,
    ) -> Self {
        Self {
            config,
            client,
            store,
            notifier,
            redirector,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn store(&self) -> &Rc<dyn CredentialStore> {
        &self.store
    }

    /// 发送一次调用。失败时先完成副作用，再把错误交还调用方。
    pub async fn send(&self, call: Call) -> Result<HttpResponse, GatewayError> {
        let method = call.method;
        let path = call.path.clone();
        let req = self.build_request(call);

        debug!(
            method = %method,
            url = %req.url,
            authorized = req.header("authorization").is_some(),
            "dispatching request"
        );

        let timeout = self.config.timeout();
        let outcome = match tokio::time::timeout(timeout, self.client.send(req)).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout(timeout)),
        };

        let failure = match outcome {
            Ok(resp) if resp.is_success() => {
                debug!(method = %method, path = %path, status = resp.status, "request succeeded");
                return Ok(resp);
            }
            Ok(resp) => Failure::Status(resp),
            Err(e) => Failure::Transport(e),
        };

        let err = GatewayError::new(failure);
        warn!(
            method = %method,
            path = %path,
            class = ?err.class,
            status = ?err.status(),
            "request failed: {}",
            err
        );
        self.apply_side_effects(err.class);
        Err(err)
    }

    /// 在派发时读取凭据，不缓存
    fn build_request(&self, call: Call) -> HttpRequest {
        let mut req = HttpRequest::new(&self.config.url(&call.path), call.method)
            .with_upload_progress(call.upload_progress);

        if let Some(token) = self.store.token() {
            req = req.with_header("Authorization", &format!("Bearer {token}"));
        }

        // multipart 的 Content-Type（含 boundary）交给传输层生成
        if !matches!(call.body, Some(RequestBody::Multipart(_))) {
            req = req.with_header("Content-Type", JSON_CONTENT_TYPE);
        }

        match call.body {
            Some(body) => req.with_body(body),
            None => req,
        }
    }

    /// 每个失败分类只产生一类副作用
    fn apply_side_effects(&self, class: ErrorClass) {
        if class == ErrorClass::Unauthorized {
            if let Err(e) = self.store.clear() {
                warn!(error = %e, "failed to clear credential after 401");
            }
            self.redirector.redirect(LOGIN_PATH);
        }
        if let Some(notice) = class.notice() {
            self.notifier.notify(notice);
        }
    }
}
