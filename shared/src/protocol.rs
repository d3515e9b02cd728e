use crate::{AccountStatus, AdminProfile, DeliveryStatus, PromotionStatus, RefundStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Success envelope used by every backend endpoint: `{ "message": <payload> }`.
///
/// Some older endpoints return the payload at the top level instead; that shape
/// is treated as a backend defect and is not accepted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub message: T,
}

/// Error body returned by the backend on failures.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminProfile,
}

// =========================================================
// Admins
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAdmin {
    pub fullname: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    pub password: String,
    pub role: String,
    pub status: AccountStatus,
}

/// Partial update; only the fields that are set are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AccountStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordChange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
    pub new_password: String,
}

// =========================================================
// Promotions
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPromotion {
    pub promo_code: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub discount_type: String,
    pub discount_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_order_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_discount_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u64>,
    pub status: PromotionStatus,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoValidation {
    pub promo_code: String,
    pub order_amount: f64,
}

// =========================================================
// Refunds / Orders / Products / Contact
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundStatusUpdate {
    pub status: RefundStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_amount: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub delivery_status: DeliveryStatus,
}

/// Basic product edits (name, price, description, quantity) go as JSON;
/// image changes go through the multipart create endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_quantity: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactStatusUpdate {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_updates_skip_unset_fields() {
        let update = AdminUpdate {
            status: Some(AccountStatus::Inactive),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "status": "inactive" }));

        let update = ProductUpdate {
            product_quantity: Some(4),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "product_quantity": 4 }));
    }

    #[test]
    fn login_response_accepts_id_alias() {
        let resp: LoginResponse = serde_json::from_value(json!({
            "token": "abc",
            "admin": { "id": 3, "fullname": "Root", "email": "root@shop.test", "role": "super_admin" }
        }))
        .unwrap();
        assert_eq!(resp.admin.admin_id.as_str(), "3");
        assert_eq!(resp.admin.role, "super_admin");
    }

    #[test]
    fn order_status_update_wire_format() {
        let body = OrderStatusUpdate {
            delivery_status: DeliveryStatus::Shipped,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "delivery_status": "shipped" })
        );
    }
}
