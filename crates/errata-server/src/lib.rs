mod auth;
mod health;
mod panic;
mod raised;
mod render;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use errata_config::Config;
use errata_responder::Responder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub use raised::{ApiJson, Raised};

/// Assembled server with application routes and the error boundary
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Wrap application routes with health, auth and exception rendering
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation
    pub fn new(config: Config, routes: Router) -> anyhow::Result<Self> {
        config.validate()?;

        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let responder = Arc::new(Responder::from_config(config.responder));

        let mut app = routes;

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        app = app.fallback(render::not_found);

        // Apply middleware layers (innermost first)

        // Panics become uncaught exceptions
        app = app.layer(CatchPanicLayer::custom(panic::panic_response));

        // Bearer token authentication
        if let Some(auth_config) = config.server.auth
            && auth_config.enabled
        {
            let auth_config = Arc::new(auth_config);
            app = app.layer(axum::middleware::from_fn(move |req, next| {
                let config = Arc::clone(&auth_config);
                async move { auth::auth_middleware(config, req, next).await }
            }));
        }

        // Exceptions raised anywhere inside are rendered here
        app = app.layer(axum::middleware::from_fn_with_state(responder, render::render_exceptions));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
