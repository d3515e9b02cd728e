//! 路由服务模块 - 核心引擎
//!
//! 实现了"请求 -> 验证 -> 处理 -> 加载"的导航流程。
//! 守卫在每次导航时重新读取凭据存储，从不缓存判断结果。

use crate::route::{AppRoute, Gate};
use crate::storage::CredentialStore;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

/// 守卫对一次导航的判断
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// 可以渲染目标页面
    Render(AppRoute),
    /// 不渲染目标页面，转到另一路由
    Redirect(AppRoute),
}

impl GuardDecision {
    /// 最终落到的路由
    pub fn route(&self) -> &AppRoute {
        match self {
            GuardDecision::Render(r) | GuardDecision::Redirect(r) => r,
        }
    }

    pub fn into_route(self) -> AppRoute {
        match self {
            GuardDecision::Render(r) | GuardDecision::Redirect(r) => r,
        }
    }
}

/// **核心守卫逻辑**：纯函数
pub fn decide(route: &AppRoute, authenticated: bool) -> GuardDecision {
    match (route.gate(), authenticated) {
        (Gate::Authenticated, true) => GuardDecision::Render(route.clone()),
        (Gate::Authenticated, false) => GuardDecision::Redirect(AppRoute::auth_failure_redirect()),
        (Gate::Login, true) => GuardDecision::Redirect(AppRoute::auth_success_redirect()),
        (Gate::Login, false) => GuardDecision::Render(AppRoute::Login),
        (Gate::Public, _) => GuardDecision::Render(route.clone()),
    }
}

/// 路由守卫：凭据存在与否由注入的存储决定
#[derive(Clone)]
pub struct RouteGuard {
    store: Rc<dyn CredentialStore>,
}

impl RouteGuard {
    pub fn new(store: Rc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    pub fn check(&self, route: &AppRoute) -> GuardDecision {
        decide(route, self.store.is_authenticated())
    }
}

/// 整页跳转能力，供网关在会话失效时使用
pub trait Redirector {
    fn redirect(&self, path: &str);
}

/// 路由器服务
///
/// 维护一个简单的历史栈，栈顶即当前路由。
pub struct Router {
    guard: RouteGuard,
    history: RefCell<Vec<AppRoute>>,
}

impl Router {
    /// 以首次请求的路径初始化，同样经过守卫
    pub fn new(store: Rc<dyn CredentialStore>, initial_path: &str) -> Self {
        let router = Self {
            guard: RouteGuard::new(store),
            history: RefCell::new(Vec::new()),
        };
        router.navigate(initial_path);
        router
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    pub fn current(&self) -> AppRoute {
        self.history.borrow().last().cloned().unwrap_or_default()
    }

    pub fn history(&self) -> Vec<AppRoute> {
        self.history.borrow().clone()
    }

    /// 导航到路径（推入历史）
    pub fn navigate(&self, path: &str) -> AppRoute {
        self.navigate_to_route(AppRoute::from_path(path), true)
    }

    /// 导航到路径（替换当前历史项）
    pub fn replace(&self, path: &str) -> AppRoute {
        self.navigate_to_route(AppRoute::from_path(path), false)
    }

    /// 历史后退，落点同样经过守卫
    pub fn back(&self) -> AppRoute {
        let target = {
            let mut history = self.history.borrow_mut();
            if history.len() > 1 {
                history.pop();
            }
            history.last().cloned().unwrap_or_default()
        };
        self.navigate_to_route(target, false)
    }

    /// 凭据变化后重新评估当前路由
    pub fn refresh(&self) -> AppRoute {
        self.navigate_to_route(self.current(), false)
    }

    /// 根据当前路由渲染；matcher 只会拿到守卫放行的路由
    pub fn render<V>(&self, matcher: impl FnOnce(&AppRoute) -> V) -> V {
        let route = self.refresh();
        matcher(&route)
    }

    fn navigate_to_route(&self, target: AppRoute, use_push: bool) -> AppRoute {
        let resolved = match self.guard.check(&target) {
            GuardDecision::Render(route) => route,
            GuardDecision::Redirect(route) => {
                info!(from = %target, to = %route, "navigation redirected by route guard");
                route
            }
        };

        let mut history = self.history.borrow_mut();
        if !use_push {
            history.pop();
        }
        history.push(resolved.clone());
        debug!(route = %resolved, depth = history.len(), "route loaded");
        resolved
    }
}

impl Redirector for Router {
    /// 整页跳转：丢弃历史后重新导航
    fn redirect(&self, path: &str) {
        self.history.borrow_mut().clear();
        self.navigate(path);
    }
}

#[cfg(test)]
pub use recording::RecordingRedirector;

#[cfg(test)]
mod recording {
    use super::Redirector;
    use std::cell::RefCell;

    #[derive(Default)]
    pub struct RecordingRedirector {
        pub redirects: RefCell<Vec<String>>,
    }

    impl RecordingRedirector {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn recorded(&self) -> Vec<String> {
            self.redirects.borrow().clone()
        }
    }

    impl Redirector for RecordingRedirector {
        fn redirect(&self, path: &str) {
            self.redirects.borrow_mut().push(path.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Credential, MemoryCredentialStore, TOKEN_KEY};
    use gemadmin_shared::AdminProfile;

    fn signed_in() -> Rc<MemoryCredentialStore> {
        let store = MemoryCredentialStore::new();
        store
            .save(&Credential {
                token: "abc".into(),
                profile: AdminProfile::default(),
            })
            .unwrap();
        Rc::new(store)
    }

    fn protected_routes() -> Vec<AppRoute> {
        vec![
            AppRoute::Dashboard,
            AppRoute::Users,
            AppRoute::Products,
            AppRoute::AddProduct,
            AppRoute::ProductView("5".into()),
            AppRoute::Orders,
            AppRoute::Refunds,
            AppRoute::Promotions,
            AppRoute::Admins,
            AppRoute::Ads,
        ]
    }

    #[test]
    fn decision_table() {
        for route in protected_routes() {
            assert_eq!(decide(&route, true), GuardDecision::Render(route.clone()));
            assert_eq!(decide(&route, false), GuardDecision::Redirect(AppRoute::Login));
        }
        assert_eq!(decide(&AppRoute::Login, true), GuardDecision::Redirect(AppRoute::Dashboard));
        assert_eq!(decide(&AppRoute::Login, false), GuardDecision::Render(AppRoute::Login));
        assert_eq!(decide(&AppRoute::NotFound, false), GuardDecision::Render(AppRoute::NotFound));
        assert_eq!(decide(&AppRoute::NotFound, true), GuardDecision::Render(AppRoute::NotFound));
    }

    #[test]
    fn guard_rereads_store_every_time() {
        let store = signed_in();
        let guard = RouteGuard::new(store.clone());
        assert_eq!(guard.check(&AppRoute::Orders), GuardDecision::Render(AppRoute::Orders));

        store.clear().unwrap();
        assert_eq!(guard.check(&AppRoute::Orders), GuardDecision::Redirect(AppRoute::Login));

        store.set_raw(TOKEN_KEY, "");
        assert_eq!(guard.check(&AppRoute::Orders), GuardDecision::Redirect(AppRoute::Login));
    }

    #[test]
    fn authenticated_session_renders_protected_screens() {
        let router = Router::new(signed_in(), "/dashboard");
        for route in protected_routes() {
            let path = route.to_path();
            assert_eq!(router.navigate(&path), route);
            let rendered = router.render(|r| r.clone());
            assert_eq!(rendered, route);
            assert_ne!(rendered, AppRoute::Login);
        }
    }

    #[test]
    fn anonymous_session_never_renders_protected_screens() {
        let router = Router::new(Rc::new(MemoryCredentialStore::new()), "/order");
        assert_eq!(router.current(), AppRoute::Login);

        for route in protected_routes() {
            router.navigate(&route.to_path());
            let rendered = router.render(|r| r.clone());
            assert_eq!(rendered, AppRoute::Login);
        }
    }

    #[test]
    fn login_screen_redirects_when_signed_in() {
        let router = Router::new(signed_in(), "/login");
        assert_eq!(router.current(), AppRoute::Dashboard);
        assert_eq!(router.navigate("/login"), AppRoute::Dashboard);
        assert!(!router.history().contains(&AppRoute::Login));
    }

    #[test]
    fn back_is_guarded_after_sign_out() {
        let store = signed_in();
        let router = Router::new(store.clone(), "/dashboard");
        router.navigate("/order");
        router.navigate("/refund");

        store.clear().unwrap();
        assert_eq!(router.back(), AppRoute::Login);
        assert_eq!(router.current(), AppRoute::Login);
    }

    #[test]
    fn refresh_follows_credential_changes() {
        let store = Rc::new(MemoryCredentialStore::new());
        let router = Router::new(store.clone(), "/login");
        assert_eq!(router.current(), AppRoute::Login);

        store
            .save(&Credential {
                token: "abc".into(),
                profile: AdminProfile::default(),
            })
            .unwrap();
        assert_eq!(router.refresh(), AppRoute::Dashboard);

        store.clear().unwrap();
        assert_eq!(router.refresh(), AppRoute::Login);
    }

    #[test]
    fn render_rechecks_before_producing_content() {
        let store = signed_in();
        let router = Router::new(store.clone(), "/admin");
        assert_eq!(router.current(), AppRoute::Admins);

        store.clear().unwrap();
        let mut protected_rendered = false;
        router.render(|r| protected_rendered = r.requires_auth());
        assert!(!protected_rendered);
    }

    #[test]
    fn redirect_resets_history() {
        let store = signed_in();
        let router = Router::new(store.clone(), "/dashboard");
        router.navigate("/users");
        router.navigate("/ads");

        store.clear().unwrap();
        router.redirect("/login");
        assert_eq!(router.history(), vec![AppRoute::Login]);
    }

    #[test]
    fn not_found_is_public() {
        let router = Router::new(Rc::new(MemoryCredentialStore::new()), "/nope");
        assert_eq!(router.current(), AppRoute::NotFound);
    }
}
