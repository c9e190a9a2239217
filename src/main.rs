use anyhow::{Context, Result};
use clap::Parser;
use meet_dashboard::{create_router, AppState, Config, PresenceStore, Templates, Watchdog};
use std::path::PathBuf;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Meeting presence dashboard
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Optional config file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory with page templates and dashboard assets
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

impl Cli {
    fn apply(self, cfg: &mut Config) {
        if let Some(bind) = self.bind {
            cfg.bind = bind;
        }
        if let Some(port) = self.port {
            cfg.port = port;
        }
        if let Some(static_dir) = self.static_dir {
            cfg.static_dir = static_dir;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meet_dashboard=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut cfg = Config::load(cli.config.as_deref())?;
    cli.apply(&mut cfg);

    let templates = Templates::load(&cfg.static_dir)?;
    info!("Loaded templates from {}", cfg.static_dir.display());

    let presence = PresenceStore::new();

    let (quit_tx, quit_rx) = watch::channel(false);
    let watchdog = Watchdog::new(presence.clone(), cfg.watchdog()).spawn(quit_rx);

    let state = AppState::new(
        presence,
        templates,
        cfg.zoom_url.as_str(),
        cfg.static_dir.clone(),
    );
    let app = create_router(state);

    let addr = cfg.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not listen on {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    let _ = quit_tx.send(true);
    watchdog.await.context("watchdog task panicked")?;
    info!("Shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
