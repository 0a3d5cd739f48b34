//! Authentication service implementation
//!
//! Pass-through client for the hosted authentication API. It owns the
//! session slot shared with the data repositories and announces every
//! session change on the backend client's broadcast channel.

use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use url::Url;
use crate::config::AuthConfig;
use crate::database::connection::BackendClient;
use crate::models::user::{AuthChange, AuthChangeEvent, AuthUser, OAuthProvider, Session, SignUpResponse};
use crate::utils::errors::{AuthError, EventicHubError, Result};
use crate::utils::logging::{log_api_error, log_auth_event};

const MISSING_SESSION: &str = "Auth session missing!";
const DEFAULT_EXPIRES_IN: i64 = 3600;

/// Outcome of a sign-up request
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    /// The account was confirmed immediately and a session issued
    SignedIn(Session),
    /// The account waits for email confirmation
    ConfirmationRequired(Option<AuthUser>),
}

impl From<SignUpResponse> for SignUpOutcome {
    fn from(response: SignUpResponse) -> Self {
        match response {
            SignUpResponse::Session(session) => SignUpOutcome::SignedIn(session),
            SignUpResponse::ConfirmationRequired(user) => SignUpOutcome::ConfirmationRequired(Some(user)),
            SignUpResponse::Wrapped { session: Some(session), .. } => SignUpOutcome::SignedIn(session),
            SignUpResponse::Wrapped { user, session: None } => SignUpOutcome::ConfirmationRequired(user),
        }
    }
}

/// Authentication API client
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: BackendClient,
    redirect_url: String,
}

impl AuthClient {
    /// Create a new AuthClient instance
    pub fn new(client: BackendClient, config: &AuthConfig) -> Self {
        Self {
            client,
            redirect_url: config.redirect_url.clone(),
        }
    }

    pub fn backend(&self) -> &BackendClient {
        &self.client
    }

    /// Create an account; `full_name` is stored as user metadata
    pub async fn sign_up(&self, email: &str, password: &str, full_name: Option<&str>) -> Result<SignUpOutcome> {
        debug!(email = %email, "Signing up");

        let body = json!({
            "email": email,
            "password": password,
            "data": { "full_name": full_name },
        });

        let response: SignUpResponse = self.post("signup", None, &body, None).await?;
        let outcome = SignUpOutcome::from(response);

        match &outcome {
            SignUpOutcome::SignedIn(session) => {
                self.set_session(AuthChangeEvent::SignedIn, session.clone()).await;
                log_auth_event("sign_up", Some(&session.user.id.to_string()), Some(email));
            }
            SignUpOutcome::ConfirmationRequired(_) => {
                log_auth_event("sign_up_pending_confirmation", None, Some(email));
            }
        }

        Ok(outcome)
    }

    /// Exchange email and password for a session
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        debug!(email = %email, "Signing in with password");

        let body = json!({ "email": email, "password": password });
        let session: Session = self.post("token", Some("password"), &body, None).await?;

        self.set_session(AuthChangeEvent::SignedIn, session.clone()).await;
        log_auth_event("sign_in", Some(&session.user.id.to_string()), Some(email));

        Ok(session)
    }

    /// Exchange the current refresh token for a new session
    pub async fn refresh_session(&self) -> Result<Session> {
        let current = self.client
            .current_session()
            .await
            .ok_or_else(|| AuthError::local(MISSING_SESSION))?;

        let body = json!({ "refresh_token": current.refresh_token });
        let session: Session = self.post("token", Some("refresh_token"), &body, None).await?;

        self.set_session(AuthChangeEvent::TokenRefreshed, session.clone()).await;
        log_auth_event("token_refreshed", Some(&session.user.id.to_string()), None);

        Ok(session)
    }

    /// Revoke the current session.
    ///
    /// The local session is cleared and `SignedOut` announced whatever the
    /// remote service answers; its error is still returned.
    pub async fn sign_out(&self) -> Result<()> {
        let current = self.client.current_session().await;

        let remote = match &current {
            Some(session) => self.logout(&session.access_token).await,
            None => {
                debug!("Sign out without a session, skipping remote call");
                Ok(())
            }
        };

        self.client.store_session(None).await;
        self.client.announce(AuthChange {
            event: AuthChangeEvent::SignedOut,
            session: None,
        });

        let user_id = current.map(|session| session.user.id.to_string());
        log_auth_event("sign_out", user_id.as_deref(), None);

        if let Err(e) = &remote {
            warn!(error = %e, "Remote sign out failed, local session cleared anyway");
        }
        remote
    }

    /// Authorization URL of an external provider; no request is made
    pub fn sign_in_with_oauth(&self, provider: OAuthProvider) -> Result<Url> {
        let authorize = self.client.auth_url("authorize")?;
        let url = format!(
            "{}?provider={}&redirect_to={}",
            authorize,
            provider.as_str(),
            urlencoding::encode(&self.redirect_url)
        );

        debug!(provider = %provider, "Built OAuth authorization URL");
        Ok(Url::parse(&url)?)
    }

    /// Finish an OAuth sign-in from the URL the provider redirected to
    pub async fn session_from_redirect(&self, redirect: &str) -> Result<Session> {
        let url = Url::parse(redirect)?;
        let params = redirect_params(&url);
        let param = |key: &str| {
            params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };

        if let Some(description) = param("error_description").or_else(|| param("error")) {
            return Err(AuthError {
                status: 0,
                code: param("error_code").or_else(|| param("error")),
                message: description,
            }
            .into());
        }

        let access_token = param("access_token")
            .ok_or_else(|| AuthError::local("No access token found in redirect URL"))?;
        let refresh_token = param("refresh_token")
            .ok_or_else(|| AuthError::local("No refresh token found in redirect URL"))?;
        let expires_in = param("expires_in")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_EXPIRES_IN);
        let expires_at = param("expires_at").and_then(|v| v.parse().ok());
        let token_type = param("token_type").unwrap_or_else(|| "bearer".to_string());

        let user = self.fetch_user(&access_token).await?;
        let session = Session {
            access_token,
            refresh_token,
            token_type,
            expires_in,
            expires_at,
            user,
        };

        self.set_session(AuthChangeEvent::SignedIn, session.clone()).await;
        log_auth_event("oauth_sign_in", Some(&session.user.id.to_string()), session.user.email.as_deref());

        Ok(session)
    }

    /// Identity behind the current session, as the remote service sees it
    pub async fn get_user(&self) -> Result<AuthUser> {
        let session = self.client
            .current_session()
            .await
            .ok_or_else(|| AuthError::local(MISSING_SESSION))?;

        self.fetch_user(&session.access_token).await
    }

    /// Session held in memory; nothing is persisted between runs
    pub async fn get_session(&self) -> Option<Session> {
        self.client.current_session().await
    }

    /// Announce the current session as the initial one
    pub async fn initial_session(&self) -> Option<Session> {
        let session = self.client.current_session().await;
        self.client.announce(AuthChange {
            event: AuthChangeEvent::InitialSession,
            session: session.clone(),
        });
        session
    }

    /// Tell listeners the signed-in user's data changed
    pub async fn announce_user_updated(&self) {
        let session = self.client.current_session().await;
        self.client.announce(AuthChange {
            event: AuthChangeEvent::UserUpdated,
            session,
        });
    }

    pub fn on_auth_state_change(&self) -> broadcast::Receiver<AuthChange> {
        self.client.subscribe()
    }

    async fn set_session(&self, event: AuthChangeEvent, session: Session) {
        self.client.store_session(Some(session.clone())).await;
        info!(event = %event, user_id = %session.user.id, "Session changed");
        self.client.announce(AuthChange {
            event,
            session: Some(session),
        });
    }

    async fn fetch_user(&self, access_token: &str) -> Result<AuthUser> {
        let response = self
            .request(Method::GET, "user", None, Some(access_token))?
            .send()
            .await?;
        decode(response, "user").await
    }

    async fn logout(&self, access_token: &str) -> Result<()> {
        let response = self
            .request(Method::POST, "logout", None, Some(access_token))?
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log_api_error("auth", &body, Some("logout"));
            return Err(AuthError::from_body(status.as_u16(), &body).into());
        }
        Ok(())
    }

    async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        grant_type: Option<&str>,
        body: &serde_json::Value,
        access_token: Option<&str>,
    ) -> Result<T> {
        let response = self
            .request(Method::POST, endpoint, grant_type, access_token)?
            .json(body)
            .send()
            .await?;
        decode(response, endpoint).await
    }

    fn request(
        &self,
        method: Method,
        endpoint: &str,
        grant_type: Option<&str>,
        access_token: Option<&str>,
    ) -> Result<reqwest::RequestBuilder> {
        let url = self.client.auth_url(endpoint)?;

        let mut request = self.client
            .http()
            .request(method, url)
            .header("apikey", self.client.anon_key())
            .bearer_auth(access_token.unwrap_or(self.client.anon_key()));

        if let Some(grant_type) = grant_type {
            request = request.query(&[("grant_type", grant_type)]);
        }
        Ok(request)
    }
}

async fn decode<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        log_api_error("auth", &body, Some(endpoint));
        return Err(AuthError::from_body(status.as_u16(), &body).into());
    }

    serde_json::from_str(&body).map_err(EventicHubError::Serialization)
}

/// Key/value pairs of the fragment, falling back to the query string
fn redirect_params(url: &Url) -> Vec<(String, String)> {
    let source = url
        .fragment()
        .filter(|fragment| !fragment.is_empty())
        .or_else(|| url.query())
        .unwrap_or_default();

    url::form_urlencoded::parse(source.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
