//! 路由定义模块 - 领域模型
//!
//! 纯粹的路由表，不依赖任何 I/O。

use std::fmt::Display;

pub const LOGIN_PATH: &str = "/login";
pub const LANDING_PATH: &str = "/dashboard";

/// 进入某个页面需要满足的条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// 需要已登录
    Authenticated,
    /// 登录页：已登录时不应再显示
    Login,
    /// 任何人可见
    Public,
}

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Login,
    Dashboard,
    Users,
    Products,
    AddProduct,
    /// 商品详情，携带商品 ID
    ProductView(String),
    Orders,
    Refunds,
    Promotions,
    Admins,
    Ads,
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举，忽略查询串和末尾的 `/`
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };

        match path {
            "/login" => Self::Login,
            "/" | "/dashboard" => Self::Dashboard,
            "/users" => Self::Users,
            "/product" => Self::Products,
            "/addproduct" => Self::AddProduct,
            "/order" => Self::Orders,
            "/refund" => Self::Refunds,
            "/promo" => Self::Promotions,
            "/admin" => Self::Admins,
            "/ads" => Self::Ads,
            other => match other.strip_prefix("/view/") {
                Some(id) if !matches!(id, "" | "." | "..") && !id.contains('/') => {
                    Self::ProductView(id.to_string())
                }
                _ => Self::NotFound,
            },
        }
    }

    /// 获取路由对应的规范 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => LOGIN_PATH.to_string(),
            Self::Dashboard => LANDING_PATH.to_string(),
            Self::Users => "/users".to_string(),
            Self::Products => "/product".to_string(),
            Self::AddProduct => "/addproduct".to_string(),
            Self::ProductView(id) => format!("/view/{id}"),
            Self::Orders => "/order".to_string(),
            Self::Refunds => "/refund".to_string(),
            Self::Promotions => "/promo".to_string(),
            Self::Admins => "/admin".to_string(),
            Self::Ads => "/ads".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫属性：该路由属于哪一种门**
    pub fn gate(&self) -> Gate {
        match self {
            Self::Login => Gate::Login,
            Self::NotFound => Gate::Public,
            _ => Gate::Authenticated,
        }
    }

    pub fn requires_auth(&self) -> bool {
        self.gate() == Gate::Authenticated
    }

    /// 未登录访问受保护页面时的去向
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 已登录访问登录页时的去向
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_screen_paths() {
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path(""), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/dashboard"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/product"), AppRoute::Products);
        assert_eq!(AppRoute::from_path("/addproduct"), AppRoute::AddProduct);
        assert_eq!(AppRoute::from_path("/promo"), AppRoute::Promotions);
        assert_eq!(AppRoute::from_path("/view/42"), AppRoute::ProductView("42".into()));
        assert_eq!(AppRoute::from_path("/view/"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/view/4/2"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/view/.."), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/view/."), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/settings"), AppRoute::NotFound);
    }

    #[test]
    fn ignores_query_and_trailing_slash() {
        assert_eq!(AppRoute::from_path("/order/?status=shipped"), AppRoute::Orders);
        assert_eq!(AppRoute::from_path("/users#top"), AppRoute::Users);
        assert_eq!(AppRoute::from_path("/login?next=/ads"), AppRoute::Login);
    }

    #[test]
    fn paths_round_trip() {
        let routes = [
            AppRoute::Login,
            AppRoute::Dashboard,
            AppRoute::Users,
            AppRoute::Products,
            AppRoute::AddProduct,
            AppRoute::ProductView("ring-9".into()),
            AppRoute::Orders,
            AppRoute::Refunds,
            AppRoute::Promotions,
            AppRoute::Admins,
            AppRoute::Ads,
        ];
        for route in routes {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn gates() {
        assert_eq!(AppRoute::Login.gate(), Gate::Login);
        assert_eq!(AppRoute::NotFound.gate(), Gate::Public);
        assert_eq!(AppRoute::Orders.gate(), Gate::Authenticated);
        assert!(AppRoute::ProductView("1".into()).requires_auth());
        assert!(!AppRoute::Login.requires_auth());
    }
}
