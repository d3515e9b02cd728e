use super::{AdminApi, segment, with_json};
use crate::error::ApiError;
use crate::gateway::Call;
use crate::request::HttpClient;
use gemadmin_shared::{DeliveryStatus, Order, OrderStatusUpdate, RecordId};
use serde_json::Value;

impl<C: HttpClient> AdminApi<'_, C> {
    pub async fn all_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.fetch(Call::get("/orders/all")).await
    }

    pub async fn order(&self, id: &RecordId) -> Result<Order, ApiError> {
        self.fetch(Call::get(format!("/orders/{}", segment(id)?))).await
    }

    pub async fn update_order_status(
        &self,
        id: &RecordId,
        delivery_status: DeliveryStatus,
    ) -> Result<Value, ApiError> {
        let body = OrderStatusUpdate { delivery_status };
        self.fetch(with_json(Call::patch(format!("/orders/{}/status", segment(id)?)), &body)?)
            .await
    }
}
