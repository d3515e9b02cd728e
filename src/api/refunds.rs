use super::{AdminApi, segment, with_json};
use crate::error::ApiError;
use crate::gateway::Call;
use crate::request::HttpClient;
use gemadmin_shared::{RecordId, Refund, RefundStatusUpdate};
use serde_json::Value;

impl<C: HttpClient> AdminApi<'_, C> {
    pub async fn all_refunds(&self) -> Result<Vec<Refund>, ApiError> {
        self.fetch(Call::get("/refunds/all")).await
    }

    pub async fn user_refunds(&self) -> Result<Vec<Refund>, ApiError> {
        self.fetch(Call::get("/refunds/user")).await
    }

    pub async fn refund(&self, id: &RecordId) -> Result<Refund, ApiError> {
        self.fetch(Call::get(format!("/refunds/{}", segment(id)?))).await
    }

    pub async fn refund_stats(&self) -> Result<Value, ApiError> {
        self.fetch(Call::get("/refunds/stats")).await
    }

    pub async fn update_refund_status(
        &self,
        id: &RecordId,
        update: &RefundStatusUpdate,
    ) -> Result<Value, ApiError> {
        self.fetch(with_json(Call::patch(format!("/refunds/{}/status", segment(id)?)), update)?)
            .await
    }

    pub async fn cancel_refund(&self, id: &RecordId) -> Result<Value, ApiError> {
        self.fetch(Call::patch(format!("/refunds/{}/cancel", segment(id)?))).await
    }

    pub async fn delete_refund(&self, id: &RecordId) -> Result<Value, ApiError> {
        self.fetch(Call::delete(format!("/refunds/{}", segment(id)?))).await
    }
}
