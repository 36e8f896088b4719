use std::env;

use showcase_server::config::load_config;

#[tokio::main]
async fn main() {
    // Load .env if present; absence is not an error.
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("Warning: failed to load .env file: {e}");
        }
    }

    let config_path = env::var("SHOWCASE_CONFIG").ok();
    let cfg = match load_config(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    showcase_server::init_tracing(&cfg.logging.level);
    tracing::info!(
        path = config_path.as_deref().unwrap_or("showcase.toml"),
        "configuration loaded"
    );

    let app = match showcase_server::build_app(&cfg).await {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Startup error: {e}");
            std::process::exit(2);
        }
    };

    let addr = cfg.addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind {addr}: {e}");
            std::process::exit(2);
        }
    };

    tracing::info!(%addr, "listening");
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to install shutdown handler");
    }
}
