//! `gemadmin` 命令行
//!
//! 控制台版本的管理后台：`open` 把路径交给路由守卫，
//! 放行后拉取该页面的数据并以 JSON 输出。

use crate::api::AdminApi;
use crate::auth;
use crate::config::GatewayConfig;
use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::notice::TracingNotifier;
use crate::request::{HttpClient, ReqwestHttpClient};
use crate::route::AppRoute;
use crate::router::Router;
use crate::storage::{CredentialStore, FileCredentialStore};
use anyhow::Context;
use clap::{Parser, Subcommand};
use gemadmin_shared::chrono::{DateTime, Utc};
use gemadmin_shared::{
    AdStats, AdminStats, OrderStats, ProductStats, PromotionStats, RecordId, RefundStats,
    UserStats,
};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::rc::Rc;
use tracing::info;

pub const ENV_STORE_PATH: &str = "GEMADMIN_STORE";

#[derive(Parser)]
#[command(name = "gemadmin")]
#[command(about = "Console for the jewelry shop admin backend")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Credential file (defaults to $GEMADMIN_STORE or ~/.config/gemadmin/credentials.json)")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Sign in and store the session credential")]
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    #[command(about = "Clear the stored session credential")]
    Logout,

    #[command(about = "Show the signed-in admin")]
    Whoami,

    #[command(about = "Open a screen, e.g. /order or /view/42")]
    Open {
        #[arg(default_value = "/dashboard")]
        path: String,
    },
}

fn store_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    if let Some(path) = &cli.store {
        return Ok(path.clone());
    }
    if let Some(path) = std::env::var_os(ENV_STORE_PATH).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    FileCredentialStore::default_path()
        .context("cannot locate a credential file: set GEMADMIN_STORE or HOME")
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let store: Rc<dyn CredentialStore> = Rc::new(FileCredentialStore::new(store_path(&cli)?));
    let config = GatewayConfig::from_env();
    info!(base_url = config.base_url(), timeout = ?config.timeout(), "gateway configured");

    let initial = match &cli.command {
        Commands::Open { path } => path.as_str(),
        Commands::Login { .. } => "/login",
        Commands::Logout | Commands::Whoami => "/dashboard",
    };
    let router = Rc::new(Router::new(store.clone(), initial));
    let client = ReqwestHttpClient::new(config.timeout())?;
    let gateway = Gateway::new(
        config,
        client,
        store.clone(),
        Rc::new(TracingNotifier),
        router.clone(),
    );

    match cli.command {
        Commands::Login { email, password } => {
            let credential = auth::login(&gateway, store.as_ref(), &email, &password)
                .await
                .map_err(|e| anyhow::anyhow!(e.display_message("Login failed")))?;
            let landing = router.refresh();
            print_json(&json!({
                "admin": credential.profile,
                "redirect": landing.to_path(),
            }))
        }
        Commands::Logout => {
            auth::logout(store.as_ref())?;
            router.refresh();
            println!("Signed out.");
            Ok(())
        }
        Commands::Whoami => match auth::current_admin(store.as_ref()) {
            Some(profile) => print_json(&serde_json::to_value(profile)?),
            None => anyhow::bail!("not signed in"),
        },
        Commands::Open { .. } => {
            let route = router.render(|route| route.clone());
            let api = AdminApi::new(&gateway);
            match load_screen(&api, &route, Utc::now()).await {
                Ok(screen) => print_json(&screen),
                Err(e) => {
                    // 401 时网关已经通过路由器跳回登录页
                    let fallback = format!("Failed to load {route}");
                    anyhow::bail!("{} (now at {})", e.display_message(&fallback), router.current())
                }
            }
        }
    }
}

fn screen(route: &AppRoute, stats: Value, items: Value) -> Value {
    json!({ "screen": route.to_path(), "stats": stats, "items": items })
}

/// 拉取某个页面需要的数据。只接收守卫放行后的路由。
pub async fn load_screen<C: HttpClient>(
    api: &AdminApi<'_, C>,
    route: &AppRoute,
    now: DateTime<Utc>,
) -> Result<Value, ApiError> {
    let value = match route {
        AppRoute::Login => json!({ "screen": route.to_path(), "message": "Please login to continue." }),
        AppRoute::NotFound => json!({ "screen": route.to_path(), "message": "Page not found." }),
        AppRoute::AddProduct => json!({ "screen": route.to_path() }),
        AppRoute::Dashboard => {
            let stats = api.dashboard_stats().await?;
            json!({ "screen": route.to_path(), "stats": stats })
        }
        AppRoute::ProductView(id) => {
            let product = api.product(&RecordId::from(id.as_str())).await?;
            json!({ "screen": route.to_path(), "product": product, "stock": product.stock_level().label() })
        }
        AppRoute::Users => {
            let users = api.all_users().await?;
            screen(route, json!(UserStats::from_users(&users, now)), json!(users))
        }
        AppRoute::Products => {
            let products = api.all_products().await?;
            screen(route, json!(ProductStats::from_products(&products)), json!(products))
        }
        AppRoute::Orders => {
            let orders = api.all_orders().await?;
            screen(route, json!(OrderStats::from_orders(&orders)), json!(orders))
        }
        AppRoute::Refunds => {
            let refunds = api.all_refunds().await?;
            screen(route, json!(RefundStats::from_refunds(&refunds)), json!(refunds))
        }
        AppRoute::Promotions => {
            let promotions = api.all_promotions().await?;
            screen(
                route,
                json!(PromotionStats::from_promotions(&promotions, now)),
                json!(promotions),
            )
        }
        AppRoute::Admins => {
            let admins = api.all_admins().await?;
            screen(route, json!(AdminStats::from_admins(&admins)), json!(admins))
        }
        AppRoute::Ads => {
            let ads = api.all_ads().await?;
            screen(route, json!(AdStats::from_ads(&ads)), json!(ads))
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::RecordingNotifier;
    use crate::request::MockHttpClient;
    use crate::storage::{Credential, MemoryCredentialStore};
    use gemadmin_shared::AdminProfile;
    use gemadmin_shared::chrono::TimeZone;

    const BASE: &str = "http://api.test";

    struct Console {
        gateway: Gateway<MockHttpClient>,
        router: Rc<Router>,
        store: Rc<MemoryCredentialStore>,
    }

    fn console(signed_in: bool, path: &str) -> Console {
        let store = Rc::new(MemoryCredentialStore::new());
        if signed_in {
            store
                .save(&Credential {
                    token: "abc".into(),
                    profile: AdminProfile::default(),
                })
                .unwrap();
        }
        let router = Rc::new(Router::new(store.clone(), path));
        let gateway = Gateway::new(
            GatewayConfig::new(BASE),
            MockHttpClient::new(),
            store.clone(),
            Rc::new(RecordingNotifier::new()),
            router.clone(),
        );
        Console {
            gateway,
            router,
            store,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn protected_screen_is_not_fetched_when_signed_out() {
        let c = console(false, "/order");
        let route = c.router.render(|r| r.clone());
        assert_eq!(route, AppRoute::Login);

        let out = load_screen(&AdminApi::new(&c.gateway), &route, now()).await.unwrap();
        assert_eq!(out["screen"], "/login");
        assert!(c.gateway.client().requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn orders_screen_includes_stats() {
        let c = console(true, "/order");
        c.gateway.client().mock_response(
            &format!("{BASE}/orders/all"),
            200,
            json!({ "message": [
                { "order_id": 1, "delivery_status": "pending", "amount": 100 },
                { "order_id": 2, "delivery_status": "shipped", "amount": 50 }
            ] }),
        );

        let route = c.router.render(|r| r.clone());
        let out = load_screen(&AdminApi::new(&c.gateway), &route, now()).await.unwrap();
        assert_eq!(out["screen"], "/order");
        assert_eq!(out["stats"]["total"], 2);
        assert_eq!(out["stats"]["pending"], 1);
        assert_eq!(out["stats"]["revenue"], 150.0);
        assert_eq!(out["items"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn product_view_fetches_by_id() {
        let c = console(true, "/view/42");
        c.gateway.client().mock_response(
            &format!("{BASE}/product/42"),
            200,
            json!({ "message": { "product_id": 42, "product_name": "Pearl", "product_quantity": 3 } }),
        );

        let route = c.router.render(|r| r.clone());
        assert_eq!(route, AppRoute::ProductView("42".into()));
        let out = load_screen(&AdminApi::new(&c.gateway), &route, now()).await.unwrap();
        assert_eq!(out["product"]["product_name"], "Pearl");
        assert_eq!(out["stock"], "Low Stock");
    }

    #[tokio::test]
    async fn expired_session_moves_console_to_login() {
        let c = console(true, "/users");
        c.gateway
            .client()
            .mock_response(&format!("{BASE}/users/all"), 401, json!({ "message": "jwt expired" }));

        let route = c.router.render(|r| r.clone());
        let err = load_screen(&AdminApi::new(&c.gateway), &route, now())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(c.router.current(), AppRoute::Login);
        assert_eq!(c.store.token(), None);
    }
}
