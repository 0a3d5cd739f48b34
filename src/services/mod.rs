//! Services module
//!
//! Authentication and session services, and the factory wiring every service
//! to the hosted backend

pub mod auth;
pub mod session;

// Re-export commonly used services
pub use auth::{AuthClient, SignUpOutcome};
pub use session::{SessionManager, SessionState};

use crate::config::settings::Settings;
use crate::database::{BackendClient, DataService};
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub backend: BackendClient,
    pub auth: AuthClient,
    pub data: DataService,
    pub session: SessionManager,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services sharing one backend client
    pub fn new(settings: &Settings) -> Result<Self> {
        let backend = BackendClient::new(&settings.backend)?;
        let auth = AuthClient::new(backend.clone(), &settings.auth);
        let data = DataService::new(backend.clone());
        let session = SessionManager::new(auth.clone(), data.profiles.clone());

        Ok(Self {
            backend,
            auth,
            data,
            session,
        })
    }

    /// Health check for the hosted backend
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let backend_reachable = match self.backend.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                tracing::warn!(error = %e, "Backend health check failed");
                false
            }
        };

        ServiceHealthStatus { backend_reachable }
    }
}

/// Health status of the backend connection
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub backend_reachable: bool,
}

impl ServiceHealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.backend_reachable
    }

    /// Get list of problems worth reporting
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.backend_reachable {
            issues.push("Backend is not reachable".to_string());
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_issues() {
        let healthy = ServiceHealthStatus { backend_reachable: true };
        assert!(healthy.is_healthy());
        assert!(healthy.get_issues().is_empty());

        let unreachable = ServiceHealthStatus { backend_reachable: false };
        assert!(!unreachable.is_healthy());
        assert_eq!(unreachable.get_issues(), vec!["Backend is not reachable".to_string()]);
    }
}
