// Mindcheck - HTTP server module
// Long-running server exposing the questionnaire analysis endpoint

mod handlers;
mod middleware;
mod rate_limit;

pub use handlers::{create_router, health_check, HealthStatus};
pub use middleware::rate_limit_middleware;
pub use rate_limit::RateLimiter;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::analysis::Analyzer;
use crate::config::ServerConfig;

/// Main server structure
pub struct MindcheckServer {
    /// Analyzer (shared across requests, stateless)
    analyzer: Arc<Analyzer>,
    /// Per-client limiter for /api routes
    rate_limiter: Arc<RateLimiter>,
    /// Server configuration
    config: ServerConfig,
}

impl MindcheckServer {
    /// Create a new server
    pub fn new(analyzer: Analyzer, config: ServerConfig) -> Self {
        let rate_limiter = RateLimiter::new(
            config.rate_limit_max_requests,
            Duration::from_millis(config.rate_limit_window_ms),
        );

        Self {
            analyzer: Arc::new(analyzer),
            rate_limiter: Arc::new(rate_limiter),
            config,
        }
    }

    /// Start the HTTP server and run until Ctrl-C or SIGTERM
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.config.bind_address))?;

        self.rate_limiter.start_cleanup_task();

        tracing::info!(
            cors_origins = ?self.config.cors_origins,
            rate_limit = self.config.rate_limit_max_requests,
            rate_limit_window_ms = self.config.rate_limit_window_ms,
            provider = %self.analyzer.provider().name(),
            model = %self.analyzer.provider().model(),
            "Server configured"
        );

        let app = create_router(Arc::new(self));

        tracing::info!("Starting Mindcheck server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        tracing::info!("Server closed");
        Ok(())
    }

    /// Get reference to the analyzer
    pub fn analyzer(&self) -> &Arc<Analyzer> {
        &self.analyzer
    }

    /// Get reference to the rate limiter
    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        &self.rate_limiter
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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

    tracing::info!("Shutdown signal received, shutting down gracefully");
}
