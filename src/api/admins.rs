use super::{AdminApi, segment, with_json};
use crate::error::ApiError;
use crate::gateway::Call;
use crate::request::HttpClient;
use gemadmin_shared::{Admin, AdminUpdate, NewAdmin, PasswordChange, RecordId};
use serde_json::Value;

impl<C: HttpClient> AdminApi<'_, C> {
    pub async fn all_admins(&self) -> Result<Vec<Admin>, ApiError> {
        self.fetch(Call::get("/admin/all")).await
    }

    pub async fn admin(&self, id: &RecordId) -> Result<Admin, ApiError> {
        self.fetch(Call::get(format!("/admin/{}", segment(id)?))).await
    }

    /// 当前登录的管理员
    pub async fn current_admin(&self) -> Result<Admin, ApiError> {
        self.fetch(Call::get("/admin/profile/me")).await
    }

    pub async fn create_admin(&self, admin: &NewAdmin) -> Result<Value, ApiError> {
        self.fetch(with_json(Call::post("/admin/create"), admin)?).await
    }

    pub async fn update_admin(&self, id: &RecordId, update: &AdminUpdate) -> Result<Value, ApiError> {
        self.fetch(with_json(Call::patch(format!("/admin/{}", segment(id)?)), update)?)
            .await
    }

    pub async fn delete_admin(&self, id: &RecordId) -> Result<Value, ApiError> {
        self.fetch(Call::delete(format!("/admin/{}", segment(id)?))).await
    }

    pub async fn change_admin_password(
        &self,
        id: &RecordId,
        change: &PasswordChange,
    ) -> Result<Value, ApiError> {
        self.fetch(with_json(Call::patch(format!("/admin/{}/password", segment(id)?)), change)?)
            .await
    }
}
