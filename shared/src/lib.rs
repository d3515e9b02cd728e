//! gemadmin 共享模型
//!
//! 后端 REST API 的线上数据结构，以及各管理页面使用的统计计算。
//! 本 crate 不做任何 I/O。

pub mod date;
pub mod protocol;
pub mod serde_helper;
pub mod stats;

pub use chrono;
pub use protocol::*;
pub use serde_helper::RecordId;
pub use stats::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date::lenient_datetime;
use crate::serde_helper::{lenient_f64, lenient_opt_f64, lenient_opt_u64, lenient_u64};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 超级管理员角色标识
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

/// 库存低于该值视为"库存紧张"
pub const LOW_STOCK_THRESHOLD: u64 = 10;

// =========================================================
// 状态枚举 (Status Enums)
// =========================================================

/// 管理员账号状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    #[default]
    Active,
    Inactive,
    #[serde(other)]
    Unknown,
}

/// 广告状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdStatus {
    Active,
    Inactive,
    #[default]
    Draft,
    #[serde(other)]
    Unknown,
}

/// 订单配送状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl DeliveryStatus {
    pub const ALL: [DeliveryStatus; 5] = [
        DeliveryStatus::Pending,
        DeliveryStatus::Processing,
        DeliveryStatus::Shipped,
        DeliveryStatus::Delivered,
        DeliveryStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::Processing => "processing",
            DeliveryStatus::Shipped => "shipped",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Cancelled => "cancelled",
            DeliveryStatus::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

/// 退款状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Processing,
    Cancelled,
    #[serde(other)]
    Unknown,
}

/// 促销码状态（后端字段，不含过期判断）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionStatus {
    #[default]
    Active,
    Inactive,
    #[serde(other)]
    Unknown,
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 登录后保存的管理员档案（凭据的一部分）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdminProfile {
    #[serde(alias = "id")]
    pub admin_id: RecordId,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    pub admin_id: RecordId,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub status: AccountStatus,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Admin {
    pub fn is_super_admin(&self) -> bool {
        self.role == ROLE_SUPER_ADMIN
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ad {
    pub ad_id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// 上传后的图片文件名（相对后端 uploads 目录）
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ad_type: Option<String>,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default)]
    pub status: AdStatus,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub promo_id: RecordId,
    pub promo_code: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub discount_type: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub discount_value: f64,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub min_order_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub max_discount_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_u64")]
    pub usage_limit: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub used_count: u64,
    #[serde(default)]
    pub status: PromotionStatus,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub end_date: Option<DateTime<Utc>>,
}

/// 促销码在某一时刻的实际状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionState {
    Active,
    Expired,
    Inactive,
}

impl Promotion {
    /// 停用优先于过期；未设置结束日期的促销永不过期
    pub fn effective_state(&self, now: DateTime<Utc>) -> PromotionState {
        if self.status == PromotionStatus::Inactive {
            return PromotionState::Inactive;
        }
        if self.is_expired(now) {
            return PromotionState::Expired;
        }
        PromotionState::Active
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.end_date.is_some_and(|end| end < now)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Refund {
    pub refund_id: RecordId,
    pub order_id: RecordId,
    #[serde(default)]
    pub user_fullname: Option<String>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub refund_amount: f64,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub processed_amount: Option<f64>,
    #[serde(default)]
    pub status: RefundStatus,
    #[serde(default)]
    pub admin_notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: RecordId,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(
        default,
        alias = "createdAt",
        alias = "created",
        deserialize_with = "lenient_datetime"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: RecordId,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub product_description: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub product_price: f64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub product_quantity: u64,
    #[serde(default)]
    pub product_category: Option<String>,
    #[serde(default)]
    pub product_tag: Option<String>,
    #[serde(default)]
    pub product_image: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub discount_percentage: Option<f64>,
    #[serde(default)]
    pub discount_type: Option<String>,
}

impl Product {
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::of(self.product_quantity)
    }

    pub fn inventory_value(&self) -> f64 {
        self.product_price * self.product_quantity as f64
    }
}

/// 库存等级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    OutOfStock,
    Low,
    InStock,
}

impl StockLevel {
    pub fn of(quantity: u64) -> Self {
        match quantity {
            0 => StockLevel::OutOfStock,
            q if q < LOW_STOCK_THRESHOLD => StockLevel::Low,
            _ => StockLevel::InStock,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockLevel::OutOfStock => "Out of Stock",
            StockLevel::Low => "Low Stock",
            StockLevel::InStock => "In Stock",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub product_image: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub quantity: u64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: f64,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: RecordId,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_mobile: Option<String>,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub delivery_status: DeliveryStatus,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: f64,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(
        default,
        alias = "created",
        alias = "createdAt",
        deserialize_with = "lenient_datetime"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(alias = "id")]
    pub contact_id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(
        default,
        alias = "createdAt",
        alias = "created",
        deserialize_with = "lenient_datetime"
    )]
    pub created_at: Option<DateTime<Utc>>,
}
