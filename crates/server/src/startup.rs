use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use tower_http::cors::CorsLayer;
use tracing::info;

use configs::Environment;
use service::auth::{CookiePolicy, TokenService};

use crate::routes::{self, auth::ServerState};

fn build_cors() -> CorsLayer {
    // Frontend sends the session cookie cross-origin; very_permissive
    // mirrors the origin and allows credentials.
    CorsLayer::very_permissive()
}

/// Host/port from config file, env vars as fallback.
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => (cfg.server.host, cfg.server.port),
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(5000);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Public entry: connect, migrate, build the app, serve.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_default();

    let mut auth_cfg = configs::load_default().map(|c| c.auth).unwrap_or_default();
    auth_cfg.normalize_from_env();
    // Fatal on signing-key misconfiguration, before any token is minted
    auth_cfg.validate()?;

    let db = models::db::connect().await?;
    Migrator::up(&db, None).await?;
    info!("migrations applied");

    let state = ServerState {
        db,
        tokens: Arc::new(TokenService::new(&auth_cfg.jwt_secret, auth_cfg.token_ttl_hours as i64)),
        cookies: CookiePolicy::for_deployment(auth_cfg.environment == Environment::Production),
    };

    let app: Router = routes::build_router(build_cors(), state);

    let addr = load_bind_addr()?;
    info!(%addr, environment = ?auth_cfg.environment, "starting http server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
