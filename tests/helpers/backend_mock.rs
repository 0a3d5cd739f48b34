//! Mock hosted backend for testing
//!
//! Wraps a wiremock server that answers like the authentication API under
//! `/auth/v1` and the table API under `/rest/v1`.

use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};
use EventicHub::config::{AuthConfig, BackendConfig, LoggingConfig, Settings};
use EventicHub::database::query::SINGLE_OBJECT;
use EventicHub::services::ServiceFactory;

use super::test_data::{profile_json, session_json};

pub const TEST_ANON_KEY: &str = "test-anon-key";
pub const TEST_ACCESS_TOKEN: &str = "user-access-token";

/// Mock backend server for testing
pub struct BackendMockServer {
    pub server: MockServer,
}

impl BackendMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Settings pointing every client at this server
    pub fn settings(&self) -> Settings {
        Self::settings_for(&self.server.uri())
    }

    /// Test settings for an arbitrary backend URL
    pub fn settings_for(url: &str) -> Settings {
        Settings {
            backend: BackendConfig {
                url: url.to_string(),
                anon_key: TEST_ANON_KEY.to_string(),
                request_timeout_seconds: Some(5),
            },
            auth: AuthConfig {
                redirect_url: "http://localhost:3000/auth/callback".to_string(),
                default_oauth_provider: "google".to_string(),
            },
            logging: LoggingConfig {
                level: "debug".to_string(),
                file_path: None,
            },
        }
    }

    pub fn services(&self) -> ServiceFactory {
        ServiceFactory::new(&self.settings()).expect("services should build against the mock server")
    }

    /// Password grant answering with a session for `user_id`
    pub async fn mock_sign_in_success(&self, user_id: Uuid, email: &str) {
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_param("grant_type", "password"))
            .and(header("apikey", TEST_ANON_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(session_json(user_id, email, TEST_ACCESS_TOKEN)))
            .mount(&self.server)
            .await;
    }

    /// Password grant rejecting the credentials
    pub async fn mock_sign_in_failure(&self) {
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_param("grant_type", "password"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid login credentials"
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_logout(&self, status: u16) {
        let mut response = ResponseTemplate::new(status);
        if status >= 400 {
            response = response.set_body_json(json!({"code": status, "msg": "Logout failed"}));
        }

        Mock::given(method("POST"))
            .and(path("/auth/v1/logout"))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Single-object profile read for `user_id`
    pub async fn mock_profile(&self, user_id: Uuid, full_name: &str) {
        Mock::given(method("GET"))
            .and(path("/rest/v1/profiles"))
            .and(query_param("id", format!("eq.{}", user_id)))
            .and(header("accept", SINGLE_OBJECT))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_json(user_id, full_name)))
            .mount(&self.server)
            .await;
    }

    /// Owner listing for the dashboard
    pub async fn mock_owned_events(&self, user_id: Uuid, events: Value) {
        Mock::given(method("GET"))
            .and(path("/rest/v1/events"))
            .and(query_param(
                "select",
                "*,tickets(id,name,price,quantity_total,quantity_sold),registrations(id,status)",
            ))
            .and(query_param("created_by", format!("eq.{}", user_id)))
            .and(query_param("order", "created_at.desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(events))
            .mount(&self.server)
            .await;
    }

    /// Sign in through the given services with mocked endpoints
    pub async fn sign_in(&self, services: &ServiceFactory, user_id: Uuid, email: &str, full_name: &str) {
        self.mock_sign_in_success(user_id, email).await;
        self.mock_profile(user_id, full_name).await;
        services
            .session
            .sign_in(email, "correct-password")
            .await
            .expect("mocked sign in should succeed");
    }

    /// Requests received so far whose path matches
    pub async fn requests_to(&self, request_path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == request_path)
            .count()
    }
}
