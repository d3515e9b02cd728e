use super::{AdminApi, with_json};
use crate::error::ApiError;
use crate::gateway::Call;
use crate::request::HttpClient;
use gemadmin_shared::{NewPromotion, PromoValidation, Promotion};
use serde_json::Value;

impl<C: HttpClient> AdminApi<'_, C> {
    pub async fn all_promotions(&self) -> Result<Vec<Promotion>, ApiError> {
        self.fetch(Call::get("/promotions/all")).await
    }

    pub async fn create_promotion(&self, promo: &NewPromotion) -> Result<Value, ApiError> {
        self.fetch(with_json(Call::post("/promotions/create"), promo)?)
            .await
    }

    /// 校验促销码在给定订单金额下是否可用
    pub async fn validate_promo_code(&self, promo_code: &str, order_amount: f64) -> Result<Value, ApiError> {
        let body = PromoValidation {
            promo_code: promo_code.to_string(),
            order_amount,
        };
        self.fetch(with_json(Call::post("/promotions/validate"), &body)?)
            .await
    }
}
