//! Invitation model

use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use super::event::EventSummary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: Uuid,
    pub event_id: Uuid,
    pub email: String,
    pub status: InvitationStatus,
    pub invite_token: String,
    pub sent_at: DateTime<Utc>,
    pub opened_at: Option<DateTime<Utc>>,
    pub responded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Sent,
    Opened,
    Registered,
}

/// Invitation looked up by token, with the event it invites to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvitationWithEvent {
    #[serde(flatten)]
    pub invitation: Invitation,
    #[serde(rename = "events", default)]
    pub event: Option<EventSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateInvitationRequest {
    pub event_id: Uuid,
    pub email: String,
    pub status: InvitationStatus,
    pub invite_token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateInvitationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InvitationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opened_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<DateTime<Utc>>,
}

impl CreateInvitationRequest {
    /// New invitation in the `sent` state with a freshly generated token
    pub fn new(event_id: Uuid, email: impl Into<String>) -> Self {
        Self {
            event_id,
            email: email.into(),
            status: InvitationStatus::Sent,
            invite_token: crate::utils::helpers::generate_invite_token(),
        }
    }
}

impl UpdateInvitationRequest {
    pub fn opened(at: DateTime<Utc>) -> Self {
        Self {
            status: Some(InvitationStatus::Opened),
            opened_at: Some(at),
            ..Default::default()
        }
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvitationStatus::Sent => write!(f, "sent"),
            InvitationStatus::Opened => write!(f, "opened"),
            InvitationStatus::Registered => write!(f, "registered"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_invitation_request() {
        let event_id = Uuid::new_v4();
        let request = CreateInvitationRequest::new(event_id, "guest@example.com");

        assert_eq!(request.status, InvitationStatus::Sent);
        assert_eq!(request.invite_token.len(), crate::utils::helpers::INVITE_TOKEN_LENGTH);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["status"], "sent");
        assert_eq!(json["email"], "guest@example.com");
    }
}
