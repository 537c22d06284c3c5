//! Wizard Web Server
//!
//! HTTP server for the walkthrough wizard UI.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use super::api::{self, WizardState};
use super::shutdown::ShutdownGate;
use crate::parser::{OptionTag, ScenarioRecord};
use crate::session::WalkthroughSession;

/// Grace period between the completion signal and the drain, so the final
/// page reaches the operator's browser.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Upper bound on one submission body, screenshots included.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Wizard server configuration
pub struct WizardConfig {
    pub port: u16,
    pub option_tag: OptionTag,
    pub environment: String,
    pub output_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            option_tag: OptionTag::Pv,
            environment: String::new(),
            output_dir: PathBuf::from("output"),
            static_dir: PathBuf::from("static"),
        }
    }
}

/// Main wizard server
pub struct WizardServer {
    config: WizardConfig,
    scenarios: Vec<ScenarioRecord>,
}

impl WizardServer {
    /// Create a new wizard server over an extracted scenario list.
    pub fn new(config: WizardConfig, scenarios: Vec<ScenarioRecord>) -> Self {
        Self { config, scenarios }
    }

    /// Build the router over shared state. Split out so handler tests can
    /// drive it without binding a socket.
    pub fn router(state: Arc<WizardState>, static_dir: &Path) -> Router {
        Router::new()
            .route("/", get(api::render_current))
            .route("/generate", post(api::submit_result))
            .route("/download", get(api::download_result))
            .nest_service("/static", ServeDir::new(static_dir))
            .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Start the server and block until the walkthrough completes or the
    /// process is killed.
    pub async fn start(self) -> Result<()> {
        let (gate, shutdown_rx) = ShutdownGate::new();

        let state = Arc::new(WizardState {
            session: WalkthroughSession::new(self.scenarios),
            gate,
            option_tag: self.config.option_tag,
            environment: self.config.environment.clone(),
            output_dir: self.config.output_dir.clone(),
        });

        let app = Self::router(state, &self.config.static_dir);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));

        println!("\n🧭 Wizard started!");
        println!("   Open: http://localhost:{}", self.config.port);
        println!("   Option tag: {}", self.config.option_tag);
        println!("   Results: {}", self.config.output_dir.display());
        println!("\n   The wizard exits on its own after the last scenario.\n");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        let serve = axum::serve(listener, app.into_make_service()).with_graceful_shutdown(
            async move {
                // Fired at most once by the gate; never resolves if the
                // operator kills the process first.
                let _ = shutdown_rx.await;
                log::info!(
                    "walkthrough complete, draining in {}s",
                    SHUTDOWN_GRACE.as_secs()
                );
                tokio::time::sleep(SHUTDOWN_GRACE).await;
                println!("Shutting down");
            },
        );

        if let Err(err) = serve.await {
            log::error!("server drain failed: {err:#}");
        }

        Ok(())
    }
}
