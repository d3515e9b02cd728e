//! 管理页面顶部的统计卡片
//!
//! 每个列表页在拉取数据后都会计算一组汇总数字，这里是纯函数实现。

use crate::{
    AccountStatus, Ad, AdStatus, Admin, DeliveryStatus, Order, Product, Promotion,
    PromotionStatus, Refund, RefundStatus, StockLevel, User,
};
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductStats {
    pub total: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub inventory_value: f64,
}

impl ProductStats {
    pub fn from_products(products: &[Product]) -> Self {
        let mut stats = Self {
            total: products.len(),
            ..Default::default()
        };
        for p in products {
            match p.stock_level() {
                StockLevel::OutOfStock => stats.out_of_stock += 1,
                StockLevel::Low => stats.low_stock += 1,
                StockLevel::InStock => {}
            }
            stats.inventory_value += p.inventory_value();
        }
        stats
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub processing: usize,
    pub shipped: usize,
    pub delivered: usize,
    pub cancelled: usize,
    pub revenue: f64,
}

impl OrderStats {
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut stats = Self {
            total: orders.len(),
            ..Default::default()
        };
        for order in orders {
            match order.delivery_status {
                DeliveryStatus::Pending => stats.pending += 1,
                DeliveryStatus::Processing => stats.processing += 1,
                DeliveryStatus::Shipped => stats.shipped += 1,
                DeliveryStatus::Delivered => stats.delivered += 1,
                DeliveryStatus::Cancelled => stats.cancelled += 1,
                DeliveryStatus::Unknown => {}
            }
            // 已取消订单仍计入营收，与管理后台现有口径一致
            stats.revenue += order.amount;
        }
        stats
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefundStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub processing: usize,
}

impl RefundStats {
    pub fn from_refunds(refunds: &[Refund]) -> Self {
        let count = |s: RefundStatus| refunds.iter().filter(|r| r.status == s).count();
        Self {
            total: refunds.len(),
            pending: count(RefundStatus::Pending),
            approved: count(RefundStatus::Approved),
            rejected: count(RefundStatus::Rejected),
            processing: count(RefundStatus::Processing),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub draft: usize,
}

impl AdStats {
    pub fn from_ads(ads: &[Ad]) -> Self {
        let count = |s: AdStatus| ads.iter().filter(|a| a.status == s).count();
        Self {
            total: ads.len(),
            active: count(AdStatus::Active),
            inactive: count(AdStatus::Inactive),
            draft: count(AdStatus::Draft),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdminStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub super_admins: usize,
}

impl AdminStats {
    pub fn from_admins(admins: &[Admin]) -> Self {
        Self {
            total: admins.len(),
            active: admins
                .iter()
                .filter(|a| a.status == AccountStatus::Active)
                .count(),
            inactive: admins
                .iter()
                .filter(|a| a.status == AccountStatus::Inactive)
                .count(),
            super_admins: admins.iter().filter(|a| a.is_super_admin()).count(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PromotionStats {
    pub total: usize,
    /// 后端状态为 active 的数量（不扣除已过期）
    pub active: usize,
    pub expired: usize,
    pub total_usage: u64,
}

impl PromotionStats {
    pub fn from_promotions(promotions: &[Promotion], now: DateTime<Utc>) -> Self {
        Self {
            total: promotions.len(),
            active: promotions
                .iter()
                .filter(|p| p.status == PromotionStatus::Active)
                .count(),
            expired: promotions.iter().filter(|p| p.is_expired(now)).count(),
            total_usage: promotions
                .iter()
                .fold(0, |acc: u64, p| acc.saturating_add(p.used_count)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub total: usize,
    pub new_this_month: usize,
}

impl UserStats {
    /// 没有注册时间的用户不计入本月新增
    pub fn from_users(users: &[User], now: DateTime<Utc>) -> Self {
        let new_this_month = users
            .iter()
            .filter_map(|u| u.created_at)
            .filter(|created| created.year() == now.year() && created.month() == now.month())
            .count();
        Self {
            total: users.len(),
            new_this_month,
        }
    }
}
