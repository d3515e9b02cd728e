use super::{AdminApi, segment, with_json};
use crate::error::ApiError;
use crate::gateway::Call;
use crate::request::HttpClient;
use gemadmin_shared::{ContactMessage, ContactStatusUpdate, RecordId};
use serde_json::Value;

impl<C: HttpClient> AdminApi<'_, C> {
    pub async fn contact_messages(&self) -> Result<Vec<ContactMessage>, ApiError> {
        self.fetch(Call::get("/contact/messages")).await
    }

    pub async fn update_contact_status(
        &self,
        id: &RecordId,
        status: &str,
    ) -> Result<Value, ApiError> {
        let body = ContactStatusUpdate {
            status: status.to_string(),
        };
        self.fetch(with_json(Call::patch(format!("/contact/messages/{}", segment(id)?)), &body)?)
            .await
    }
}
