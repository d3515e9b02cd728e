use super::AdminApi;
use crate::error::ApiError;
use crate::gateway::Call;
use crate::request::HttpClient;
use serde_json::Value;

pub const DEFAULT_SALES_PERIOD: &str = "7days";
pub const DEFAULT_REVENUE_PERIOD: &str = "monthly";

// 统计接口的结构由后端定义，原样返回 JSON
impl<C: HttpClient> AdminApi<'_, C> {
    pub async fn dashboard_stats(&self) -> Result<Value, ApiError> {
        self.fetch_raw(Call::get("/analytics/dashboard")).await
    }

    pub async fn sales_analytics(&self, period: Option<&str>) -> Result<Value, ApiError> {
        let period = period.unwrap_or(DEFAULT_SALES_PERIOD);
        self.fetch_raw(Call::get(format!("/analytics/sales?period={period}")))
            .await
    }

    pub async fn product_analytics(&self) -> Result<Value, ApiError> {
        self.fetch_raw(Call::get("/analytics/products")).await
    }

    pub async fn user_analytics(&self) -> Result<Value, ApiError> {
        self.fetch_raw(Call::get("/analytics/users")).await
    }

    pub async fn order_analytics(&self) -> Result<Value, ApiError> {
        self.fetch_raw(Call::get("/analytics/orders")).await
    }

    pub async fn revenue_analytics(&self, period: Option<&str>) -> Result<Value, ApiError> {
        let period = period.unwrap_or(DEFAULT_REVENUE_PERIOD);
        self.fetch_raw(Call::get(format!("/analytics/revenue?period={period}")))
            .await
    }

    pub async fn todays_orders(&self) -> Result<Value, ApiError> {
        self.fetch_raw(Call::get("/analytics/today-orders")).await
    }
}
