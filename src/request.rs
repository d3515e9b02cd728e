use futures::StreamExt;
use gemadmin_shared::HttpMethod;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[cfg(test)]
use std::cell::RefCell;

/// 上传文件时每次交给连接的块大小
const UPLOAD_CHUNK_SIZE: usize = 16 * 1024;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 上传进度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    /// 已交给连接的文件字节数
    pub loaded: u64,
    /// 本次请求所有文件部分的总字节数
    pub total: u64,
}

pub type UploadProgressFn = Arc<dyn Fn(UploadProgress) + Send + Sync>;

/// multipart 表单中的一个字段
#[derive(Debug, Clone, PartialEq)]
pub enum PartValue {
    Text(String),
    File {
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub value: PartValue,
}

/// 有序的 multipart 表单，允许同名字段重复出现（如多张 `images`）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl ToString) -> Self {
        self.parts.push(FormPart {
            name: name.to_string(),
            value: PartValue::Text(value.to_string()),
        });
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        self.parts.push(FormPart {
            name: name.to_string(),
            value: PartValue::File {
                file_name: file_name.to_string(),
                content_type: content_type.to_string(),
                bytes,
            },
        });
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// 第一个同名文本字段的值
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match &p.value {
            PartValue::Text(v) if p.name == name => Some(v.as_str()),
            _ => None,
        })
    }

    /// 所有文件部分的字节总数
    pub fn file_bytes(&self) -> u64 {
        self.parts
            .iter()
            .map(|p| match &p.value {
                PartValue::File { bytes, .. } => bytes.len() as u64,
                PartValue::Text(_) => 0,
            })
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

/// 传输层请求
#[derive(Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<RequestBody>,
    pub upload_progress: Option<UploadProgressFn>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
            upload_progress: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_upload_progress(mut self, callback: Option<UploadProgressFn>) -> Self {
        self.upload_progress = callback;
        self
    }

    /// 按名称（忽略大小写）读取请求头
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("upload_progress", &self.upload_progress.is_some())
            .finish()
    }
}

/// 原始响应，网关不做任何改写
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// 小写的响应头名 -> 值
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// 没有拿到 HTTP 响应的失败
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to build request: {0}")]
    Build(String),
}

/// HTTP 客户端特性 (Trait)
/// 单线程协作式执行，因此不要求 Send
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

// =========================================================
// 实现层: reqwest 客户端 (Production)
// =========================================================

#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestHttpClient {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;
        Ok(Self { client, timeout })
    }

    fn map_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else if e.is_builder() {
            TransportError::Build(e.to_string())
        } else {
            TransportError::Network(e.to_string())
        }
    }
}

fn to_reqwest_method(m: HttpMethod) -> reqwest::Method {
    match m {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

/// 把文件字节切块成流，每交出一块就上报一次进度
fn progress_body(
    bytes: Vec<u8>,
    total: u64,
    loaded: Arc<AtomicU64>,
    callback: UploadProgressFn,
) -> reqwest::Body {
    let chunks: Vec<Vec<u8>> = bytes.chunks(UPLOAD_CHUNK_SIZE).map(<[u8]>::to_vec).collect();
    let stream = futures::stream::iter(chunks).map(move |chunk| {
        let len = chunk.len() as u64;
        let now = loaded.fetch_add(len, Ordering::Relaxed) + len;
        callback(UploadProgress { loaded: now, total });
        Ok::<_, std::io::Error>(chunk)
    });
    reqwest::Body::wrap_stream(stream)
}

fn build_form(
    form: MultipartForm,
    progress: Option<UploadProgressFn>,
) -> Result<reqwest::multipart::Form, TransportError> {
    let total = form.file_bytes();
    let loaded = Arc::new(AtomicU64::new(0));
    let mut out = reqwest::multipart::Form::new();

    for part in form.parts {
        match part.value {
            PartValue::Text(text) => out = out.text(part.name, text),
            PartValue::File {
                file_name,
                content_type,
                bytes,
            } => {
                let len = bytes.len() as u64;
                let body = match &progress {
                    Some(cb) => progress_body(bytes, total, loaded.clone(), cb.clone()),
                    None => reqwest::Body::from(bytes),
                };
                let file = reqwest::multipart::Part::stream_with_length(body, len)
                    .file_name(file_name)
                    .mime_str(&content_type)
                    .map_err(|e| TransportError::Build(e.to_string()))?;
                out = out.part(part.name, file);
            }
        }
    }
    Ok(out)
}

#[async_trait::async_trait(?Send)]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(req.method), &req.url);

        for (k, v) in &req.headers {
            builder = builder.header(k, v);
        }

        match req.body {
            Some(RequestBody::Json(value)) => builder = builder.body(value.to_string()),
            Some(RequestBody::Multipart(form)) => {
                builder = builder.multipart(build_form(form, req.upload_progress)?)
            }
            None => {}
        }

        let resp = builder.send().await.map_err(|e| self.map_error(e))?;

        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .filter_map(|(k, v)| {
                v.to_str()
                    .ok()
                    .map(|v| (k.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = resp.text().await.map_err(|e| self.map_error(e))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
#[derive(Clone)]
enum MockReply {
    Respond { status: u16, body: String },
    Fail(TransportError),
}

#[cfg(test)]
pub struct MockHttpClient {
    // URL -> (延迟, 回复)
    replies: RefCell<HashMap<String, (Duration, MockReply)>>,
    // 记录发出的请求
    pub requests: RefCell<Vec<HttpRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            replies: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn mock_response(&self, url: &str, status: u16, body: serde_json::Value) {
        self.mock_delayed(url, Duration::ZERO, status, body);
    }

    pub fn mock_delayed(&self, url: &str, delay: Duration, status: u16, body: serde_json::Value) {
        self.replies.borrow_mut().insert(
            url.to_string(),
            (
                delay,
                MockReply::Respond {
                    status,
                    body: body.to_string(),
                },
            ),
        );
    }

    pub fn mock_failure(&self, url: &str, error: TransportError) {
        self.replies
            .borrow_mut()
            .insert(url.to_string(), (Duration::ZERO, MockReply::Fail(error)));
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        // 模拟一次完整上传
        if let (Some(RequestBody::Multipart(form)), Some(cb)) = (&req.body, &req.upload_progress) {
            let total = form.file_bytes();
            cb(UploadProgress {
                loaded: total,
                total,
            });
        }

        let url = req.url.clone();
        self.requests.borrow_mut().push(req);

        // 先取出回复再 await，避免跨 await 持有 RefCell 借用
        let reply = self.replies.borrow().get(&url).cloned();
        let Some((delay, reply)) = reply else {
            return Ok(HttpResponse::new(404, "Not Found"));
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match reply {
            MockReply::Respond { status, body } => Ok(HttpResponse::new(status, body)),
            MockReply::Fail(e) => Err(e),
        }
    }
}
