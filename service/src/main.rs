use anyhow::Context;
use pneuscope_paths::PneuscopePaths;
use pneuscope_service::{app, config::ServiceConfig};
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // sin HOME (contenedores) se sigue solo con el entorno
    let settings_file = match PneuscopePaths::new().and_then(|paths| paths.ensure_structure().map(|_| paths)) {
        Ok(paths) => {
            if paths.needs_defaults()? {
                ServiceConfig::default()
                    .write(&paths.settings_file)
                    .with_context(|| format!("writing defaults to {}", paths.settings_file.display()))?;
                info!(path = %paths.settings_file.display(), "default settings written");
            }
            Some(paths.settings_file)
        }
        Err(e) => {
            warn!(error = %e, "no settings directory available, using environment only");
            None
        }
    };

    let cfg = ServiceConfig::load(settings_file.as_deref()).context("loading service configuration")?;
    info!(
        risk_policy = ?cfg.assessor.engine.risk_policy,
        confidence_policy = ?cfg.assessor.engine.confidence_policy,
        samples_per_second = cfg.assessor.engine.samples_per_second,
        seeded = cfg.assessor.rng_seed.is_some(),
        "configuration loaded"
    );

    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("pneuscope listening on {addr}");

    axum::serve(listener, app(&cfg))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
