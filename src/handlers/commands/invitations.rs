//! Invitation command handlers

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;
use crate::models::invitation::{CreateInvitationRequest, Invitation, InvitationStatus, UpdateInvitationRequest};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::helpers::format_timestamp;
use super::SIGN_IN_REQUIRED;

pub async fn handle_invite(services: &ServiceFactory, event_id: Uuid, email: &str) -> Result<String> {
    if services.session.require_user().await.is_err() {
        return Ok(SIGN_IN_REQUIRED.to_string());
    }

    let request = CreateInvitationRequest::new(event_id, email);
    let invitation = services.data.invitations.create(&request).await?;

    info!(invitation_id = %invitation.id, event_id = %event_id, "Invitation created");
    Ok(format!(
        "Invitation for {} created. Share this token: {}",
        invitation.email, invitation.invite_token
    ))
}

/// Show an invitation by token and mark it opened the first time
pub async fn handle_invitation(services: &ServiceFactory, token: &str) -> Result<String> {
    let found = services.data.invitations.get_by_token(token).await?;
    let invitation = &found.invitation;

    if invitation.status == InvitationStatus::Sent {
        let patch = UpdateInvitationRequest::opened(Utc::now());
        if let Err(e) = services.data.invitations.update(invitation.id, &patch).await {
            warn!(invitation_id = %invitation.id, error = %e, "Failed to mark invitation opened");
        }
    }

    let mut lines = vec![format!("You're invited, {}!", invitation.email)];
    match &found.event {
        Some(event) => {
            lines.push(event.title.clone());
            lines.push(format!("Starts: {}", format_timestamp(event.start_date)));
            if let Some(venue) = &event.venue_address {
                lines.push(format!("Where:  {}", venue));
            }
            if let Some(description) = &event.description {
                lines.push(String::new());
                lines.push(description.clone());
            }
            lines.push(String::new());
            lines.push(format!("Run `register {}` to attend.", event.id));
        }
        None => lines.push("The event for this invitation is no longer available.".to_string()),
    }

    Ok(lines.join("\n"))
}

pub async fn handle_invitations(services: &ServiceFactory, event_id: Uuid) -> Result<String> {
    if services.session.require_user().await.is_err() {
        return Ok(SIGN_IN_REQUIRED.to_string());
    }

    let invitations = services.data.invitations.list_for_event(event_id).await?;
    Ok(render_invitations(&invitations))
}

pub fn render_invitations(invitations: &[Invitation]) -> String {
    if invitations.is_empty() {
        return "No invitations sent for this event.".to_string();
    }

    invitations
        .iter()
        .map(|i| format!("{}  {} [{}] sent {}", i.id, i.email, i.status, format_timestamp(i.sent_at)))
        .collect::<Vec<_>>()
        .join("\n")
}
