//! 认证模块
//!
//! 管理会话的建立与结束。路由守卫只读取存储，与本模块解耦。

use crate::error::{ApiError, StoreError};
use crate::gateway::{Call, Gateway};
use crate::request::HttpClient;
use crate::storage::{Credential, CredentialStore};
use gemadmin_shared::{AdminProfile, LoginRequest, LoginResponse};
use tracing::info;

pub const LOGIN_ENDPOINT: &str = "/admin/login";

/// 登录并保存凭据
///
/// 登录接口直接返回 `{ token, admin }`，不经过 `message` 信封。
/// token 与档案一次性写入存储。
pub async fn login<C: HttpClient>(
    gateway: &Gateway<C>,
    store: &dyn CredentialStore,
    email: &str,
    password: &str,
) -> Result<Credential, ApiError> {
    let body = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    let body = serde_json::to_value(&body).map_err(ApiError::Encode)?;

    let resp = gateway.send(Call::post(LOGIN_ENDPOINT).json(body)).await?;
    let LoginResponse { token, admin } = resp.json().map_err(ApiError::Decode)?;

    let credential = Credential {
        token,
        profile: admin,
    };
    store.save(&credential)?;
    info!(email = %credential.profile.email, role = %credential.profile.role, "signed in");
    Ok(credential)
}

/// 清除 token 与档案
pub fn logout(store: &dyn CredentialStore) -> Result<(), StoreError> {
    store.clear()?;
    info!("signed out");
    Ok(())
}

pub fn current_admin(store: &dyn CredentialStore) -> Option<AdminProfile> {
    store.profile()
}
