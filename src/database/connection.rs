//! Backend connection management
//!
//! `BackendClient` is the single handle to the hosted backend. It owns the
//! HTTP client, the public API key, the current session slot and the channel
//! on which session changes are announced. The auth client and every
//! repository share one instance.

use std::sync::Arc;
use std::time::Duration;
use reqwest::Client;
use tokio::sync::{broadcast, RwLock};
use url::Url;
use crate::config::BackendConfig;
use crate::models::user::{AuthChange, Session};
use crate::utils::errors::{EventicHubError, Result};
use super::query::QueryBuilder;

/// Path of the authentication API below the project URL
pub const AUTH_PATH: &str = "auth/v1/";
/// Path of the table API below the project URL
pub const REST_PATH: &str = "rest/v1/";

const AUTH_CHANGE_CAPACITY: usize = 16;

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: Url,
    anon_key: String,
    session: Arc<RwLock<Option<Session>>>,
    auth_changes: broadcast::Sender<AuthChange>,
}

impl BackendClient {
    /// Create a new backend client from configuration
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("EventicHub/", env!("CARGO_PKG_VERSION")));
        if let Some(seconds) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let http = builder.build()?;

        let mut base_url = Url::parse(&config.url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        if config.anon_key.is_empty() {
            return Err(EventicHubError::Config("Backend anon key is required".to_string()));
        }

        let (auth_changes, _) = broadcast::channel(AUTH_CHANGE_CAPACITY);

        tracing::info!(url = %base_url, "Backend client created");

        Ok(Self {
            http,
            base_url,
            anon_key: config.anon_key.clone(),
            session: Arc::new(RwLock::new(None)),
            auth_changes,
        })
    }

    /// Start a request against a table
    pub fn from(&self, table: &str) -> QueryBuilder {
        QueryBuilder::new(self.clone(), table)
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of a table endpoint
    pub fn rest_url(&self, table: &str) -> Result<Url> {
        Ok(self.base_url.join(REST_PATH)?.join(table)?)
    }

    /// URL of an authentication endpoint
    pub fn auth_url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(AUTH_PATH)?.join(endpoint)?)
    }

    /// Token for the `Authorization` header: the signed-in user's access
    /// token, or the anon key when nobody is signed in
    pub async fn bearer_token(&self) -> String {
        match self.session.read().await.as_ref() {
            Some(session) => session.access_token.clone(),
            None => self.anon_key.clone(),
        }
    }

    pub async fn current_session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    pub(crate) async fn store_session(&self, session: Option<Session>) {
        *self.session.write().await = session;
    }

    /// Announce a session change to every subscriber
    pub(crate) fn announce(&self, change: AuthChange) {
        // no subscribers is fine
        let _ = self.auth_changes.send(change);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AuthChange> {
        self.auth_changes.subscribe()
    }

    /// Check that the hosted backend answers
    pub async fn health_check(&self) -> Result<bool> {
        let response = self.http
            .get(self.auth_url("health")?)
            .header("apikey", &self.anon_key)
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> BackendConfig {
        BackendConfig {
            url: url.to_string(),
            anon_key: "anon".to_string(),
            request_timeout_seconds: None,
        }
    }

    #[test]
    fn test_endpoint_urls() {
        let client = BackendClient::new(&config("https://project.example.co")).unwrap();
        assert_eq!(client.rest_url("events").unwrap().as_str(), "https://project.example.co/rest/v1/events");
        assert_eq!(client.auth_url("token").unwrap().as_str(), "https://project.example.co/auth/v1/token");
    }

    #[test]
    fn test_base_path_is_kept() {
        let client = BackendClient::new(&config("http://localhost:8000/proxy")).unwrap();
        assert_eq!(client.rest_url("tickets").unwrap().as_str(), "http://localhost:8000/proxy/rest/v1/tickets");
    }

    #[test]
    fn test_anon_key_required() {
        let mut config = config("https://project.example.co");
        config.anon_key.clear();
        assert!(matches!(BackendClient::new(&config), Err(EventicHubError::Config(_))));
    }

    #[tokio::test]
    async fn test_bearer_token_defaults_to_anon_key() {
        let client = BackendClient::new(&config("https://project.example.co")).unwrap();
        assert_eq!(client.bearer_token().await, "anon");
        assert!(client.current_session().await.is_none());
    }
}
