//! Sign-in, sign-up and sign-out views

use tracing::info;
use crate::handlers::form::FormState;
use crate::models::user::OAuthProvider;
use crate::services::{ServiceFactory, SignUpOutcome};
use crate::utils::errors::Result;
use super::dashboard;

const SUBMISSION_IN_PROGRESS: &str = "Please wait, a request is already in progress.";

/// Sign in with email and password, then show the dashboard
pub async fn handle_login(services: &ServiceFactory, form: &mut FormState, email: &str, password: &str) -> Result<String> {
    if !form.begin() {
        return Ok(SUBMISSION_IN_PROGRESS.to_string());
    }

    let result = services.session.sign_in(email, password).await;
    if form.finish(result).is_none() {
        return Ok(form_error(form));
    }

    info!(email = %email, "User signed in from console");
    dashboard::handle_dashboard(services).await
}

pub async fn handle_signup(
    services: &ServiceFactory,
    form: &mut FormState,
    email: &str,
    password: &str,
    full_name: Option<&str>,
) -> Result<String> {
    if !form.begin() {
        return Ok(SUBMISSION_IN_PROGRESS.to_string());
    }

    let result = services.session.sign_up(email, password, full_name).await;
    match form.finish(result) {
        Some(SignUpOutcome::SignedIn(_)) => dashboard::handle_dashboard(services).await,
        Some(SignUpOutcome::ConfirmationRequired(_)) => Ok(format!(
            "Check your email! A confirmation link was sent to {}.",
            email
        )),
        None => Ok(form_error(form)),
    }
}

/// Print the provider's authorization URL
pub fn handle_oauth(services: &ServiceFactory, form: &mut FormState, provider: OAuthProvider) -> Result<String> {
    if !form.begin() {
        return Ok(SUBMISSION_IN_PROGRESS.to_string());
    }

    let result = services.session.sign_in_with_oauth(provider);
    match form.finish(result) {
        Some(url) => Ok(format!(
            "Open this URL in your browser to sign in with {}:\n{}\n\n\
             Then run `callback <url>` with the address you are sent back to.",
            provider, url
        )),
        None => Ok(form_error(form)),
    }
}

pub async fn handle_callback(services: &ServiceFactory, form: &mut FormState, url: &str) -> Result<String> {
    if !form.begin() {
        return Ok(SUBMISSION_IN_PROGRESS.to_string());
    }

    let result = services.session.complete_oauth_redirect(url).await;
    if form.finish(result).is_none() {
        return Ok(form_error(form));
    }

    dashboard::handle_dashboard(services).await
}

/// Sign out; local state is cleared even if the backend reports an error
pub async fn handle_logout(services: &ServiceFactory) -> Result<String> {
    services.session.sign_out().await?;
    Ok("Signed out.".to_string())
}

fn form_error(form: &FormState) -> String {
    form.error_line().unwrap_or_default()
}
