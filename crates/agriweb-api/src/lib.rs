//! HTMX front-end server for the agricultural records API
//!
//! Routes are organized into modules:
//! - routes::resources: table pages and CRUD fragments for farmers, crops,
//!   markets and transactions
//!
//! The records themselves live behind the REST API reached through
//! `client::HttpResourceApi`.
//!
//! Every full page load gets its own controller, registered under a page
//! token. HTMX requests from that page carry the token in the
//! `X-Page-Token` header (set through `hx-headers` on the page container).

pub mod client;
pub mod error;
pub mod routes;

use agriweb_config::Config;
use agriweb_core::{ResourceKind, ResourceTableController};
use axum::{
    http::HeaderMap,
    routing::{get, post},
    Router,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

pub use client::HttpResourceApi;
pub use error::ApiError;

/// Controller behind one resource page
pub type PageController = ResourceTableController<HttpResourceApi>;

/// Header carrying the page token on HTMX requests
pub const PAGE_TOKEN_HEADER: &str = "x-page-token";

struct PageEntry {
    kind: ResourceKind,
    controller: Arc<Mutex<PageController>>,
    last_used: Instant,
}

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub api: HttpResourceApi,
    pages: Arc<RwLock<HashMap<String, PageEntry>>>,
}

impl AppState {
    pub fn new(config: Config, api: HttpResourceApi) -> Self {
        Self {
            config,
            api,
            pages: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// A fresh controller, as on a new page load
    pub fn fresh_controller(&self, kind: ResourceKind) -> PageController {
        ResourceTableController::new(self.api.clone(), kind)
            .with_message_ttl(Duration::from_secs(self.config.ui.message_dismiss_secs))
    }

    fn page_idle(&self) -> Duration {
        Duration::from_secs(self.config.ui.page_idle_secs)
    }

    /// Register the controller of a new browser page and return its token
    ///
    /// Pages idle for longer than `ui.page_idle_secs` are dropped here.
    pub async fn open_page(&self, controller: PageController) -> String {
        let token = Uuid::new_v4().to_string();
        let now = Instant::now();
        let idle = self.page_idle();

        let mut pages = self.pages.write().await;
        pages.retain(|_, entry| now.duration_since(entry.last_used) < idle);
        pages.insert(
            token.clone(),
            PageEntry {
                kind: controller.kind(),
                controller: Arc::new(Mutex::new(controller)),
                last_used: now,
            },
        );
        log::debug!("Opened page {} ({} open)", token, pages.len());
        token
    }

    /// Controller of the page that sent the request
    pub async fn page(&self, name: &str, headers: &HeaderMap) -> Result<Arc<Mutex<PageController>>, ApiError> {
        let kind: ResourceKind = name.parse().map_err(|_| ApiError::NotFound {
            resource: name.to_string(),
        })?;
        let token = headers
            .get(PAGE_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::PageExpired)?;

        let now = Instant::now();
        let idle = self.page_idle();
        let mut pages = self.pages.write().await;
        let entry = match pages.get_mut(token) {
            Some(entry) if entry.kind == kind => entry,
            _ => return Err(ApiError::PageExpired),
        };
        if now.duration_since(entry.last_used) >= idle {
            pages.remove(token);
            return Err(ApiError::PageExpired);
        }
        entry.last_used = now;
        Ok(entry.controller.clone())
    }

    #[cfg(test)]
    async fn open_pages(&self) -> usize {
        self.pages.read().await.len()
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::resources::{
        htmx_close, htmx_delete, htmx_edit_form, htmx_new_form, htmx_rows, htmx_submit, page_resource,
    };

    Router::new()
        .route("/api/health", get(health_check))
        .route("/", get(index_page))
        .route("/:resource", get(page_resource))
        // HTMX partial routes
        .route("/:resource/rows", get(htmx_rows))
        .route("/:resource/new", get(htmx_new_form))
        .route("/:resource/edit/:id", get(htmx_edit_form))
        .route("/:resource/close", post(htmx_close))
        .route("/:resource/submit", post(htmx_submit))
        .route("/:resource/delete/:id", post(htmx_delete))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Agriweb</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <style>
        body {{ font-family: sans-serif; margin: 0; background: #f6f7f2; color: #1f2a1b; }}
        nav {{ background: #2f5d1e; padding: 0.75rem 1.5rem; }}
        nav a {{ color: #e8f3df; margin-right: 1.25rem; text-decoration: none; }}
        nav a.active {{ font-weight: bold; text-decoration: underline; }}
        main {{ padding: 1.5rem; }}
        table {{ width: 100%; border-collapse: collapse; background: #fff; }}
        th, td {{ padding: 0.5rem 0.75rem; border-bottom: 1px solid #e2e6dc; text-align: left; }}
        .message {{ padding: 0.75rem 1rem; margin-bottom: 1rem; border-radius: 6px; }}
        .message.success {{ background: #e3f4dc; color: #2f5d1e; }}
        .message.error {{ background: #fbe3e1; color: #8a1f16; }}
        .loading, .empty-state {{ text-align: center; color: #6b7565; padding: 2rem; }}
        .modal {{ position: fixed; inset: 0; background: rgba(0, 0, 0, 0.4); }}
        .modal-content {{ background: #fff; max-width: 28rem; margin: 10vh auto; padding: 1.5rem; border-radius: 8px; }}
        .close {{ float: right; cursor: pointer; font-size: 1.5rem; }}
        .form-group {{ margin-bottom: 0.75rem; }}
        .form-group label {{ display: block; margin-bottom: 0.25rem; }}
        .form-group input, .form-group select {{ width: 100%; padding: 0.4rem; }}
    </style>
</head>
<body>
    {}
</body>
</html>"#,
        title, content
    )
}

/// Top navigation bar
pub fn nav_bar(current_path: &str) -> String {
    let mut links = vec![("/".to_string(), "Home".to_string())];
    links.extend(
        ResourceKind::ALL
            .iter()
            .map(|kind| (format!("/{}", kind.collection()), agriweb_utils::capitalize(kind.collection()))),
    );

    let mut nav = String::from("<nav>");
    for (path, label) in &links {
        let active = if path == current_path { " class='active'" } else { "" };
        nav.push_str(&format!("<a href='{}'{}>{}</a>", path, active, label));
    }
    nav.push_str("</nav>");
    nav
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!("<main>{}</main>", inner_content)
    } else {
        base_html(title, &format!("{}<main>{}</main>", nav_bar(current_path), inner_content))
    }
}

/// Index page with navigation
async fn index_page(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let cards: Vec<String> = ResourceKind::ALL
        .iter()
        .map(|kind| {
            format!(
                "<li><a href='/{}'>Manage {}</a></li>",
                kind.collection(),
                kind.collection()
            )
        })
        .collect();

    let inner_content = format!(
        r#"<h2>Agricultural Records</h2>
        <ul>{}</ul>
        <p><a href='/{}'>Open the default page</a></p>"#,
        cards.join(""),
        state.config.ui.default_page
    );

    axum::response::Html(page_response(&headers, "Home", "/", &inner_content))
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until the process stops.
pub async fn start_server(config: Config) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let api = HttpResourceApi::new(&config.api.base_url, Duration::from_secs(config.api.timeout_secs))?;
    log::info!("Using records API at {}", api.base_url());

    let router = create_router(AppState::new(config, api));

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Agriweb server on http://{}", addr);
    for kind in ResourceKind::ALL {
        log::info!("  - /{} ({} table)", kind.collection(), kind.singular());
    }

    axum::serve(listener, router).await?;
    log::info!("Server stopped gracefully");
    Ok(())
}
