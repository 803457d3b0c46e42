use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use log::{error, info};

use crate::config::ServerConfig;
use crate::controllers::{asset_controller, list_controller, todo_controller};
use crate::middleware::TracingMiddleware;
use crate::session::{SessionMiddleware, SessionStore};
use crate::views::Views;

pub struct AppState {
    pub views: Views,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        let views = Views::new().context("Failed to load templates")?;
        Ok(Self { views })
    }
}

/// Register every route. Only the page routes sit behind the session
/// middleware, so asset requests never create a session.
pub fn app_config(cfg: &mut web::ServiceConfig, sessions: Arc<SessionStore>, cookie_name: &str) {
    cfg.configure(asset_controller::config).service(
        web::scope("")
            .wrap(SessionMiddleware::new(sessions, cookie_name))
            .configure(list_controller::config)
            .configure(todo_controller::config),
    );
}

pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    info!("Starting todo web service...");

    let app_state = web::Data::new(AppState::new()?);
    let sessions = Arc::new(SessionStore::new(
        config.session_capacity,
        config.session_idle_timeout,
    ));
    let cookie_name = config.session_cookie_name.clone();
    let bind_address = config.bind_address();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(TracingMiddleware)
            .configure(|cfg| app_config(cfg, Arc::clone(&sessions), &cookie_name))
    })
    .workers(config.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind server to {bind_address}"))?
    .run();

    info!("Todo web service listening on http://{bind_address}");

    if let Err(e) = server.await {
        error!("Web server error: {}", e);
        return Err(e).context("Web server error");
    }

    Ok(())
}
