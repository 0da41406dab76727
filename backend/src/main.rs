//! Connection feed entry-point: loads settings, prepares the store and serves
//! the connection endpoints with health probes and OpenAPI docs.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use connection_feed::inbound::http::health::HealthState;
use connection_feed::inbound::http::session_config::{BuildMode, session_settings_from_env};
use connection_feed::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().wrap_err("failed to load server settings")?;
    let session =
        session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
            .wrap_err("invalid session configuration")?;
    let bind_addr = settings.bind_addr()?;

    let mut config =
        ServerConfig::new(session, bind_addr).with_feed_pagination(settings.feed_pagination());
    if let Some(url) = settings.database_url.as_deref() {
        run_pending_migrations(url).await?;
        let pool = DbPool::new(
            PoolConfig::new(url).with_max_size(settings.db_max_connections()),
        )
        .await?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    health_state.mark_ready();
    info!(%bind_addr, "connection feed listening");

    server.await?;
    health_state.mark_unhealthy();
    Ok(())
}
