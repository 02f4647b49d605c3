use anyhow::Context;

use learning_dashboard::config::Config;
use learning_dashboard::store::ContentStore;
use learning_dashboard::{build_app, logging, open_store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let config = Config::from_env().context("invalid configuration")?;

    let _log_guard = logging::init_tracing(&config);

    let store = open_store(&config)
        .await
        .context("failed to open content store")?;
    let db_proxy = match &store {
        ContentStore::Database(db) => Some(db.proxy().clone()),
        ContentStore::Files(_) => None,
    };

    let app = build_app(store);

    let addr = config.bind_addr();
    tracing::info!(%addr, source = config.source.as_str(), "learning dashboard listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("HTTP server stopped, closing resources");

    if let Some(proxy) = db_proxy {
        proxy.close().await;
    }

    tracing::info!("graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
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
}
