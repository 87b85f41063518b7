use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tracing::{debug, info};

use passforge::builder::PassIdentifiers;
use passforge::store::SWEEP_INTERVAL;
use passforge::{ShareStore, SigningCredentials};

use crate::cfg::Cfg;
use crate::handlers::{download, generate, health, preview, templates};

/// Credentials plus the identifiers stamped into signed documents.
pub struct SigningConfig {
    pub credentials: SigningCredentials,
    pub identifiers: PassIdentifiers,
}

/// Shared state handed to every handler. The share store is the only
/// mutable piece; signing material is resolved once at startup.
#[derive(Clone)]
pub struct Deps {
    pub store: Arc<ShareStore>,
    pub signing: Option<Arc<SigningConfig>>,
}

impl Deps {
    pub fn new(cfg: &Cfg) -> Result<Self> {
        let credentials =
            SigningCredentials::load(&cfg.certs_dir, &cfg.signer_key_passphrase)
                .with_context(|| {
                    format!("failed to load signing credentials from {}", cfg.certs_dir.display())
                })?;

        let signing = match credentials {
            Some(credentials) => {
                info!("signing credentials loaded; producing signed passes");
                Some(Arc::new(SigningConfig {
                    credentials,
                    identifiers: PassIdentifiers {
                        pass_type_identifier: cfg.pass_type_identifier.clone(),
                        team_identifier: cfg.team_identifier.clone(),
                    },
                }))
            }
            None => {
                info!("no signing credentials found; producing unsigned demo passes");
                None
            }
        };

        Ok(Self {
            store: Arc::new(ShareStore::new()),
            signing,
        })
    }
}

pub fn router(deps: Deps) -> Router {
    Router::new()
        .route("/api/health", get(health::handler))
        .route("/api/pass/generate", post(generate::handler))
        .route("/api/pass/download/{id}", get(download::handler))
        .route("/api/pass/templates", get(templates::handler))
        .route("/api/pass/preview", post(preview::handler))
        .with_state(deps)
}

pub async fn run(deps: Deps, listener: TcpListener) -> Result<()> {
    spawn_sweeper(Arc::clone(&deps.store));
    let app = router(deps);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

/// Periodically drop expired share entries so abandoned generations
/// cannot grow the store without bound.
fn spawn_sweeper(store: Arc<ShareStore>) {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(SWEEP_INTERVAL);
        tick.tick().await;
        loop {
            tick.tick().await;
            let removed = store.sweep();
            if removed > 0 {
                debug!(removed, "swept expired share entries");
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(?err, "failed to listen for shutdown signal");
    }
}
