//! The courier carries notifications to Zoom Team Chat.
//!
//! Callers describe a message and a destination (a direct message, a channel,
//! or a group) in a small JSON shape. For every request Courier obtains a
//! fresh access token, translates the request into Zoom's message API, and
//! answers with a normalised success or error. See [relay].

use config::Config;
use router::Deps;
use tokio::{net::TcpListener, sync::oneshot};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod de;
mod relay;
mod router;

/// Application entrypoint. Initialises tracing, checks for environment
/// variables, binds to 0.0.0.0, and starts the server.
#[tokio::main]
async fn main() {
    let has_dotenv = dotenvy::dotenv().is_ok();

    let config = Config::from_env().expect("Invalid configuration");

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.environment.default_log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    if !has_dotenv {
        warn!("No .env found");
    }

    for var in config.missing_credentials() {
        warn!("No ${} environment variable found", var);
    }

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("Failed to bind port");

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down");
            tx.send(()).ok();
        }
    });

    server(listener, config, rx).await;
}

/// Serve until `rx` resolves, letting in-flight requests finish.
async fn server(listener: TcpListener, config: Config, rx: oneshot::Receiver<()>) {
    if let Ok(addr) = listener.local_addr() {
        info!(environment = %config.environment, "Listening on {}", addr);
    }

    axum::serve(listener, router::new(Deps::new(config)))
        .with_graceful_shutdown(async {
            rx.await.ok();
        })
        .await
        .expect("Failed to start server");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_real_health_api() {
        let (tx, rx) = oneshot::channel::<()>();

        // Port 0 requests that the OS assigns us an available port.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let config = Config::from_lookup(|_| None).unwrap();

        // Move the server into the background so that it's not blocking.
        tokio::spawn(async move { server(listener, config, rx).await });

        let res = reqwest::Client::new()
            .get(format!("http://127.0.0.1:{}/health", port))
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = res.json().await.unwrap();
        tx.send(()).unwrap();

        assert_eq!(body["status"], "healthy");
    }
}
