//! Session manager
//!
//! Holds the signed-in identity, its profile and the current session, and
//! keeps them in line with the authentication client. Every handle clones the
//! same shared state.

use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;
use crate::database::repositories::ProfileRepository;
use crate::models::profile::{Profile, UpdateProfileRequest};
use crate::models::user::{AuthChange, AuthUser, OAuthProvider, Session};
use crate::services::auth::{AuthClient, SignUpOutcome};
use crate::utils::errors::{EventicHubError, Result};

/// Snapshot of the local identity state
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub user: Option<AuthUser>,
    pub profile: Option<Profile>,
    pub session: Option<Session>,
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            profile: None,
            session: None,
            loading: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionManager {
    auth: AuthClient,
    profiles: ProfileRepository,
    state: Arc<RwLock<SessionState>>,
}

impl SessionManager {
    pub fn new(auth: AuthClient, profiles: ProfileRepository) -> Self {
        Self {
            auth,
            profiles,
            state: Arc::new(RwLock::new(SessionState::default())),
        }
    }

    /// Mirror whatever session the auth client already holds
    pub async fn initialize(&self) {
        let session = self.auth.initial_session().await;
        self.mirror(session).await;
    }

    /// Start the listener that mirrors every announced session change
    pub fn subscribe(&self) -> JoinHandle<()> {
        let mut changes = self.auth.on_auth_state_change();
        let manager = self.clone();

        tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(change) => manager.apply_change(change).await,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped = skipped, "Session listener lagged behind");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("Session change channel closed");
                        break;
                    }
                }
            }
        })
    }

    /// Mirror one session change into local state. The profile is reloaded
    /// whenever the change carries a user, so `UserUpdated` picks up edits
    /// made through another handle.
    pub async fn apply_change(&self, change: AuthChange) {
        debug!(event = %change.event, "Mirroring session change");
        self.mirror(change.session).await;
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<()> {
        self.set_loading(true).await;

        let result = self.auth.sign_in_with_password(email, password).await;
        let outcome = match result {
            Ok(session) => {
                self.mirror(Some(session)).await;
                Ok(())
            }
            Err(e) => Err(e),
        };

        self.set_loading(false).await;
        outcome
    }

    /// Create an account. A session is mirrored only when the backend
    /// confirmed the account right away.
    pub async fn sign_up(&self, email: &str, password: &str, full_name: Option<&str>) -> Result<SignUpOutcome> {
        self.set_loading(true).await;

        let result = self.auth.sign_up(email, password, full_name).await;
        if let Ok(SignUpOutcome::SignedIn(session)) = &result {
            self.mirror(Some(session.clone())).await;
        }

        self.set_loading(false).await;
        result
    }

    /// Sign out remotely and clear local state, even when the remote call fails
    pub async fn sign_out(&self) -> Result<()> {
        let result = self.auth.sign_out().await;

        {
            let mut state = self.state.write().await;
            state.user = None;
            state.profile = None;
            state.session = None;
            state.loading = false;
        }

        info!("Local session cleared");
        result
    }

    /// Provider authorization URL to open in a browser
    pub fn sign_in_with_oauth(&self, provider: OAuthProvider) -> Result<url::Url> {
        self.auth.sign_in_with_oauth(provider)
    }

    /// Sign in from the URL the OAuth provider redirected to
    pub async fn complete_oauth_redirect(&self, redirect: &str) -> Result<()> {
        self.set_loading(true).await;

        let result = self.auth.session_from_redirect(redirect).await;
        let outcome = match result {
            Ok(session) => {
                self.mirror(Some(session)).await;
                Ok(())
            }
            Err(e) => Err(e),
        };

        self.set_loading(false).await;
        outcome
    }

    pub async fn refresh_session(&self) -> Result<()> {
        let session = self.auth.refresh_session().await?;
        self.mirror(Some(session)).await;
        Ok(())
    }

    /// Update the signed-in user's profile and keep the stored row
    pub async fn update_profile(&self, updates: &UpdateProfileRequest) -> Result<Profile> {
        let user = self
            .user()
            .await
            .ok_or_else(|| EventicHubError::NotAuthenticated("No user logged in".to_string()))?;

        let profile = self.profiles.update(user.id, updates).await?;
        self.state.write().await.profile = Some(profile.clone());
        self.auth.announce_user_updated().await;

        info!(user_id = %user.id, "Profile updated");
        Ok(profile)
    }

    pub async fn user(&self) -> Option<AuthUser> {
        self.state.read().await.user.clone()
    }

    pub async fn profile(&self) -> Option<Profile> {
        self.state.read().await.profile.clone()
    }

    pub async fn session(&self) -> Option<Session> {
        self.state.read().await.session.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Signed-in user, or an error for views that need one
    pub async fn require_user(&self) -> Result<AuthUser> {
        self.user()
            .await
            .ok_or_else(|| EventicHubError::NotAuthenticated("Please sign in to continue".to_string()))
    }

    async fn set_loading(&self, loading: bool) {
        self.state.write().await.loading = loading;
    }

    async fn mirror(&self, session: Option<Session>) {
        let user = session.as_ref().map(|session| session.user.clone());

        {
            let mut state = self.state.write().await;
            state.session = session;
            state.user = user.clone();
        }

        let profile = match &user {
            Some(user) => self.load_profile(user.id).await,
            None => None,
        };

        // the identity may have changed while the profile was loading
        let mut state = self.state.write().await;
        let user_id = user.as_ref().map(|user| user.id);
        if state.user.as_ref().map(|user| user.id) == user_id {
            state.profile = profile;
        } else {
            debug!(user_id = ?user_id, "Identity changed during profile load, discarding profile");
        }
        state.loading = false;
    }

    async fn load_profile(&self, user_id: Uuid) -> Option<Profile> {
        match self.profiles.get(user_id).await {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Failed to load profile");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthConfig, BackendConfig};
    use crate::database::connection::BackendClient;
    use crate::models::user::AuthChangeEvent;

    fn manager() -> SessionManager {
        let backend = BackendClient::new(&BackendConfig {
            url: "http://127.0.0.1:9".to_string(),
            anon_key: "anon".to_string(),
            request_timeout_seconds: Some(1),
        })
        .unwrap();
        let auth = AuthClient::new(
            backend.clone(),
            &AuthConfig {
                redirect_url: "http://localhost:3000/auth/callback".to_string(),
                default_oauth_provider: "google".to_string(),
            },
        );
        SessionManager::new(auth, ProfileRepository::new(backend))
    }

    #[tokio::test]
    async fn test_initial_state() {
        let manager = manager();
        assert!(manager.is_loading().await);

        manager.initialize().await;

        let state = manager.snapshot().await;
        assert!(!state.loading);
        assert!(state.user.is_none());
        assert!(state.profile.is_none());
        assert!(state.session.is_none());
    }

    #[tokio::test]
    async fn test_update_profile_requires_user() {
        let manager = manager();
        let result = manager.update_profile(&UpdateProfileRequest::default()).await;

        match result {
            Err(EventicHubError::NotAuthenticated(message)) => assert_eq!(message, "No user logged in"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_require_user_when_signed_out() {
        assert!(matches!(
            manager().require_user().await,
            Err(EventicHubError::NotAuthenticated(_))
        ));
    }

    #[tokio::test]
    async fn test_signed_out_change_clears_state() {
        let manager = manager();
        manager
            .apply_change(AuthChange {
                event: AuthChangeEvent::SignedOut,
                session: None,
            })
            .await;

        let state = manager.snapshot().await;
        assert!(state.user.is_none());
        assert!(!state.loading);
    }
}
