//! Wiring of one authenticated console session.
//!
//! A session owns the HTTP client, the shared [`ListStore`] and hands out the
//! page services. Dropping the session closes the store, so responses still
//! in flight never reach a view that is gone.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::application::services::{AnalyticsService, AuthService, LinksConsole, OverviewService};
use crate::application::store::ListStore;
use crate::config::{self, Config};
use crate::domain::entities::AuthSession;
use crate::infrastructure::http::{ApiClient, HttpAuthGateway, HttpLinkGateway};
use crate::telemetry;

pub struct ConsoleSession {
    config: Config,
    gateway: Arc<HttpLinkGateway>,
    store: Arc<ListStore<HttpLinkGateway>>,
}

impl ConsoleSession {
    /// Loads `.env`, configuration and tracing, then starts a session.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is missing or invalid.
    pub async fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = config::load_from_env()?;
        telemetry::init_tracing(&config);
        config.print_summary();
        Self::start(config).await
    }

    /// Validates `config`, builds the gateways and populates the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built. Fetch failures do not fail the start; they show up
    /// in the store snapshot.
    pub async fn start(config: Config) -> Result<Self> {
        config.validate()?;

        let client = ApiClient::from_config(&config).context("Failed to build HTTP client")?;
        if !client.is_authenticated() {
            warn!("Starting console session without an API token");
        }

        let gateway = Arc::new(HttpLinkGateway::new(client));
        let store = ListStore::mount(gateway.clone(), config.page_size).await;
        info!(base_url = %config.api_base_url, "Console session started");

        Ok(Self {
            config,
            gateway,
            store,
        })
    }

    /// Starts a session authenticated with a freshly issued token.
    ///
    /// # Errors
    ///
    /// See [`Self::start`].
    pub async fn with_session(mut config: Config, session: &AuthSession) -> Result<Self> {
        config.api_token = Some(session.token.clone());
        Self::start(config).await
    }

    /// Auth service for obtaining a token before a session exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn auth_service(config: &Config) -> Result<AuthService<HttpAuthGateway>> {
        let client = ApiClient::new(&config.api_base_url, config.request_timeout())
            .context("Failed to build HTTP client")?;
        Ok(AuthService::new(Arc::new(HttpAuthGateway::new(client))))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Arc<ListStore<HttpLinkGateway>> {
        &self.store
    }

    pub fn overview(&self) -> OverviewService<HttpLinkGateway> {
        OverviewService::new(self.store.clone(), self.config.recent_links_limit)
    }

    pub fn links(&self) -> LinksConsole<HttpLinkGateway> {
        LinksConsole::new(self.store.clone(), self.config.api_base_url.clone())
    }

    pub fn analytics(&self) -> AnalyticsService<HttpLinkGateway, HttpLinkGateway> {
        AnalyticsService::new(self.store.clone(), self.gateway.clone())
    }

    /// Closes the store. Also happens on drop.
    pub fn close(&self) {
        self.store.close();
    }
}

impl Drop for ConsoleSession {
    fn drop(&mut self) {
        self.store.close();
    }
}
