//! gemadmin 核心库
//!
//! 珠宝电商管理后台的客户端核心：
//! - `gateway`: 访问后端的唯一入口（鉴权头、超时、失败分类与副作用）
//! - `router`: 导航时的路由守卫
//! - `api`: 各管理页面使用的类型化接口

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod notice;
pub mod request;
pub mod route;
pub mod router;
pub mod storage;

pub use api::AdminApi;
pub use config::GatewayConfig;
pub use error::{ApiError, ErrorClass, GatewayError, StoreError, classify};
pub use gateway::{Call, Gateway};
pub use notice::{Notice, Notifier, TracingNotifier};
pub use request::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient, TransportError};
pub use route::AppRoute;
pub use router::{GuardDecision, Redirector, RouteGuard, Router, decide};
pub use storage::{Credential, CredentialStore, FileCredentialStore, MemoryCredentialStore};
