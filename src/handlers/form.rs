//! Form state shared by the console views

use crate::utils::errors::Result;

/// Loading and error flags of a submitted form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub loading: bool,
    pub error: Option<String>,
}

impl FormState {
    /// Start a submission; returns false while one is already in flight
    pub fn begin(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.error = None;
        true
    }

    /// Record the outcome of a submission and reset the loading flag
    pub fn finish<T>(&mut self, result: Result<T>) -> Option<T> {
        self.loading = false;
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.error = Some(e.display_message());
                None
            }
        }
    }

    /// Error line to show under the form, if any
    pub fn error_line(&self) -> Option<String> {
        self.error.as_ref().map(|message| format!("Error: {}", message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::{AuthError, EventicHubError};

    #[test]
    fn test_error_is_shown_and_loading_reset() {
        let mut form = FormState::default();
        assert!(form.begin());
        assert!(!form.begin());

        let result: Result<()> = Err(EventicHubError::Auth(AuthError::from_body(
            400,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        )));
        assert!(form.finish(result).is_none());

        assert!(!form.loading);
        assert_eq!(form.error_line().as_deref(), Some("Error: Invalid login credentials"));
    }

    #[test]
    fn test_begin_clears_previous_error() {
        let mut form = FormState {
            loading: false,
            error: Some("old".to_string()),
        };
        assert!(form.begin());
        assert!(form.error.is_none());
        assert_eq!(form.finish(Ok(5)), Some(5));
        assert!(!form.loading);
    }
}
