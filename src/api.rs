//! 后端 REST API 的类型化封装
//!
//! 每个端点的响应结构在这里声明；网关本身不关心响应形状。
//! 成功响应统一为 `{ "message": <payload> }`。

use crate::error::ApiError;
use crate::gateway::{Call, Gateway};
use crate::request::{HttpClient, HttpResponse, MultipartForm};
use gemadmin_shared::{Envelope, RecordId};
use serde::Serialize;
use serde::de::DeserializeOwned;

mod admins;
mod ads;
mod analytics;
mod contact;
mod orders;
mod products;
mod promotions;
mod refunds;
mod users;

pub use ads::AdForm;
pub use analytics::{DEFAULT_REVENUE_PERIOD, DEFAULT_SALES_PERIOD};
pub use products::NewProduct;

/// 待上传的文件
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            bytes,
        }
    }

    fn attach(&self, form: MultipartForm, name: &str) -> MultipartForm {
        form.file(name, &self.file_name, &self.content_type, self.bytes.clone())
    }
}

/// 管理后台 API
pub struct AdminApi<'a, C: HttpClient> {
    gateway: &'a Gateway<C>,
}

impl<'a, C: HttpClient> AdminApi<'a, C> {
    pub fn new(gateway: &'a Gateway<C>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Gateway<C> {
        self.gateway
    }

    async fn send(&self, call: Call) -> Result<HttpResponse, ApiError> {
        Ok(self.gateway.send(call).await?)
    }

    /// 发送调用并取出信封中的 `message`
    async fn fetch<T: DeserializeOwned>(&self, call: Call) -> Result<T, ApiError> {
        let resp = self.send(call).await?;
        let envelope: Envelope<T> = resp.json().map_err(ApiError::Decode)?;
        Ok(envelope.message)
    }

    /// 后端自定义结构，整体返回
    async fn fetch_raw(&self, call: Call) -> Result<serde_json::Value, ApiError> {
        let resp = self.send(call).await?;
        resp.json().map_err(ApiError::Decode)
    }
}

fn with_json<B: Serialize>(call: Call, body: &B) -> Result<Call, ApiError> {
    let value = serde_json::to_value(body).map_err(ApiError::Encode)?;
    Ok(call.json(value))
}

/// 记录 id 作为单个 path 段：百分号编码，`.` 与 `..` 会被 URL 规范化吃掉，直接拒绝
fn segment(id: &RecordId) -> Result<String, ApiError> {
    match id.as_str() {
        "" | "." | ".." => Err(ApiError::InvalidId(id.to_string())),
        raw => Ok(urlencoding::encode(raw).into_owned()),
    }
}
