//! Registration command handlers

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use crate::models::registration::{
    CreateRegistrationRequest, Registration, RegistrationStatus, RegistrationWithDetails, UpdateRegistrationRequest,
};
use crate::services::ServiceFactory;
use crate::utils::errors::{EventicHubError, Result};
use crate::utils::helpers::{format_price, format_timestamp};
use super::SIGN_IN_REQUIRED;

/// Register for an event; signed-in users default to their own name and email
pub async fn handle_register(
    services: &ServiceFactory,
    event_id: Uuid,
    ticket_id: Option<Uuid>,
    name: Option<String>,
    email: Option<String>,
) -> Result<String> {
    let user = services.session.user().await;
    let profile = services.session.profile().await;

    let attendee_name = name
        .or_else(|| profile.and_then(|p| p.full_name))
        .or_else(|| user.as_ref().and_then(|u| u.user_metadata.full_name.clone()))
        .ok_or_else(|| EventicHubError::InvalidInput("Attendee name is required (--name)".to_string()))?;
    let attendee_email = email
        .or_else(|| user.as_ref().and_then(|u| u.email.clone()))
        .ok_or_else(|| EventicHubError::InvalidInput("Attendee email is required (--email)".to_string()))?;

    let request = CreateRegistrationRequest {
        event_id,
        ticket_id,
        user_id: user.map(|u| u.id),
        attendee_name,
        attendee_email,
        status: RegistrationStatus::Registered,
    };
    let registration = services.data.registrations.create(&request).await?;

    info!(registration_id = %registration.id, event_id = %event_id, "Registered for event");
    Ok(format!(
        "Registered {} for event {} (registration {}).\nRun `events show {}` for current ticket availability.",
        registration.attendee_name, event_id, registration.id, event_id
    ))
}

pub async fn handle_registrations(services: &ServiceFactory, event_id: Option<Uuid>) -> Result<String> {
    let Ok(user) = services.session.require_user().await else {
        return Ok(SIGN_IN_REQUIRED.to_string());
    };

    match event_id {
        Some(event_id) => {
            let registrations = services.data.registrations.list_for_event(event_id).await?;
            Ok(render_event_registrations(&registrations))
        }
        None => {
            let registrations = services.data.registrations.list_for_user(user.id).await?;
            Ok(render_user_registrations(&registrations))
        }
    }
}

pub async fn handle_checkin(services: &ServiceFactory, registration_id: Uuid) -> Result<String> {
    if services.session.require_user().await.is_err() {
        return Ok(SIGN_IN_REQUIRED.to_string());
    }

    let patch = UpdateRegistrationRequest::check_in(Utc::now());
    let registration = services.data.registrations.update(registration_id, &patch).await?;

    info!(registration_id = %registration.id, "Attendee checked in");
    Ok(format!("Checked in {} <{}>.", registration.attendee_name, registration.attendee_email))
}

pub async fn handle_cancel(services: &ServiceFactory, registration_id: Uuid) -> Result<String> {
    if services.session.require_user().await.is_err() {
        return Ok(SIGN_IN_REQUIRED.to_string());
    }

    let registration = services
        .data
        .registrations
        .update(registration_id, &UpdateRegistrationRequest::cancel())
        .await?;

    info!(registration_id = %registration.id, "Registration cancelled");
    Ok(format!("Registration {} cancelled.", registration.id))
}

pub fn render_user_registrations(registrations: &[RegistrationWithDetails]) -> String {
    if registrations.is_empty() {
        return "You have not registered for any events yet.".to_string();
    }

    registrations
        .iter()
        .map(|entry| {
            let (title, start) = match &entry.event {
                Some(event) => (event.title.as_str(), format_timestamp(event.start_date)),
                None => ("Unknown event", "-".to_string()),
            };
            let ticket = entry
                .ticket
                .as_ref()
                .map(|t| format!(", {} {}", t.name, format_price(t.price)))
                .unwrap_or_default();
            format!(
                "{}  {} on {} [{}]{}",
                entry.registration.id, title, start, entry.registration.status, ticket
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_event_registrations(registrations: &[Registration]) -> String {
    if registrations.is_empty() {
        return "No registrations for this event yet.".to_string();
    }

    registrations
        .iter()
        .map(|r| {
            let checked_in = r
                .check_in_time
                .map(|t| format!(", checked in {}", format_timestamp(t)))
                .unwrap_or_default();
            format!(
                "{}  {} <{}> [{}] registered {}{}",
                r.id,
                r.attendee_name,
                r.attendee_email,
                r.status,
                format_timestamp(r.registration_date),
                checked_in
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
