//! Planner web server entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and serve the planner router.

use kondate_core::logging_status;
use kondate_web::config::WebConfig;
use kondate_web::session::system_clock;
use kondate_web::{router, AppState};
use log::info;
use std::error::Error;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = WebConfig::from_env()?;

    let log_dir = config.log_dir.to_string_lossy();
    if let Err(err) = kondate_core::init_logging(&config.log_level, &log_dir) {
        // Serving still works without file logs.
        eprintln!("kondate_web: logging disabled: {err}");
    }
    if let Some((level, dir)) = logging_status() {
        println!("kondate_web logging at {level} to {}", dir.display());
    }

    let state = AppState::with_idle_timeout(system_clock(), config.session_idle);
    let listener = TcpListener::bind(config.bind).await?;
    info!(
        "event=server_start module=web status=ok bind={} session_idle_secs={}",
        listener.local_addr()?,
        state.sessions().idle_timeout().as_secs()
    );
    println!("kondate_web listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=web status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        eprintln!("kondate_web: failed to listen for ctrl-c: {err}");
    }
}
