//! Authentication identity and session models

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity record owned by the remote authentication service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

/// Metadata attached to the identity at sign-up
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Session issued by the authentication service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_in: i64,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// Expiry instant, when the service reported one
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        self.expires_at.and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    }
}

/// Sign-up either signs the user in directly or waits for email confirmation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(Session),
    ConfirmationRequired(AuthUser),
    /// Wrapped form used by some service versions; matches any object, keep last
    Wrapped {
        user: Option<AuthUser>,
        session: Option<Session>,
    },
}

/// Kind of session change broadcast to listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthChangeEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

impl fmt::Display for AuthChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthChangeEvent::InitialSession => "INITIAL_SESSION",
            AuthChangeEvent::SignedIn => "SIGNED_IN",
            AuthChangeEvent::SignedOut => "SIGNED_OUT",
            AuthChangeEvent::TokenRefreshed => "TOKEN_REFRESHED",
            AuthChangeEvent::UserUpdated => "USER_UPDATED",
        };
        write!(f, "{}", name)
    }
}

/// Session change notification
#[derive(Debug, Clone, PartialEq)]
pub struct AuthChange {
    pub event: AuthChangeEvent,
    pub session: Option<Session>,
}

/// External identity providers supported for OAuth sign-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Google,
    Github,
    Gitlab,
    Azure,
    Apple,
    Discord,
}

impl OAuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::Github => "github",
            OAuthProvider::Gitlab => "gitlab",
            OAuthProvider::Azure => "azure",
            OAuthProvider::Apple => "apple",
            OAuthProvider::Discord => "discord",
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OAuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(OAuthProvider::Google),
            "github" => Ok(OAuthProvider::Github),
            "gitlab" => Ok(OAuthProvider::Gitlab),
            "azure" => Ok(OAuthProvider::Azure),
            "apple" => Ok(OAuthProvider::Apple),
            "discord" => Ok(OAuthProvider::Discord),
            other => Err(format!("Unsupported OAuth provider: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_JSON: &str = r#"{
        "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
        "aud": "authenticated",
        "email": "ada@example.com",
        "user_metadata": {"full_name": "Ada Lovelace"},
        "created_at": "2025-01-01T10:00:00.123456Z"
    }"#;

    #[test]
    fn test_sign_up_response_with_session() {
        let json = format!(
            r#"{{"access_token":"at","refresh_token":"rt","token_type":"bearer","expires_in":3600,"expires_at":1735725600,"user":{}}}"#,
            USER_JSON
        );
        let response: SignUpResponse = serde_json::from_str(&json).unwrap();

        match response {
            SignUpResponse::Session(session) => {
                assert_eq!(session.access_token, "at");
                assert_eq!(session.user.user_metadata.full_name.as_deref(), Some("Ada Lovelace"));
                assert_eq!(
                    session.expires_at_utc().map(|t| t.to_rfc3339()),
                    Some("2025-01-01T10:00:00+00:00".to_string())
                );
            }
            other => panic!("expected session, got {:?}", other),
        }
    }

    #[test]
    fn test_sign_up_response_confirmation_required() {
        let response: SignUpResponse = serde_json::from_str(USER_JSON).unwrap();
        match response {
            SignUpResponse::ConfirmationRequired(user) => {
                assert_eq!(user.email.as_deref(), Some("ada@example.com"));
            }
            other => panic!("expected bare user, got {:?}", other),
        }
    }

    #[test]
    fn test_oauth_provider_parsing() {
        assert_eq!("Google".parse::<OAuthProvider>(), Ok(OAuthProvider::Google));
        assert_eq!(OAuthProvider::Github.to_string(), "github");
        assert!("myspace".parse::<OAuthProvider>().is_err());
    }
}
