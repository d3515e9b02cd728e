use super::{AdminApi, segment};
use crate::error::ApiError;
use crate::gateway::Call;
use crate::request::HttpClient;
use gemadmin_shared::{RecordId, User};
use serde_json::Value;

impl<C: HttpClient> AdminApi<'_, C> {
    pub async fn all_users(&self) -> Result<Vec<User>, ApiError> {
        self.fetch(Call::get("/users/all")).await
    }

    pub async fn user(&self, id: &RecordId) -> Result<User, ApiError> {
        self.fetch(Call::get(format!("/user/{}", segment(id)?))).await
    }

    pub async fn delete_user(&self, id: &RecordId) -> Result<Value, ApiError> {
        self.fetch(Call::delete(format!("/user/{}", segment(id)?))).await
    }
}
