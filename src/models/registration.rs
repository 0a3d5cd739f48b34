//! Registration model

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use super::event::EventSummary;
use super::profile::ProfileSummary;
use super::ticket::TicketPrice;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub ticket_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub attendee_name: String,
    pub attendee_email: String,
    pub status: RegistrationStatus,
    pub registration_date: DateTime<Utc>,
    pub check_in_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Registered,
    Attended,
    Cancelled,
}

/// Registration columns embedded in the owner's event list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationSummary {
    pub id: Uuid,
    pub status: RegistrationStatus,
}

/// Attendee row embedded in a single event's details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendeeEntry {
    pub id: Uuid,
    pub attendee_name: String,
    pub attendee_email: String,
    pub status: RegistrationStatus,
    pub registration_date: DateTime<Utc>,
    #[serde(default)]
    pub profiles: Option<ProfileSummary>,
}

/// A user's registration together with the event and ticket it refers to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationWithDetails {
    #[serde(flatten)]
    pub registration: Registration,
    #[serde(rename = "events", default)]
    pub event: Option<EventSummary>,
    #[serde(rename = "tickets", default)]
    pub ticket: Option<TicketPrice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRegistrationRequest {
    pub event_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    pub attendee_name: String,
    pub attendee_email: String,
    pub status: RegistrationStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateRegistrationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendee_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendee_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RegistrationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<DateTime<Utc>>,
}

impl UpdateRegistrationRequest {
    /// Mark the attendee as checked in at `at`
    pub fn check_in(at: DateTime<Utc>) -> Self {
        Self {
            status: Some(RegistrationStatus::Attended),
            check_in_time: Some(at),
            ..Default::default()
        }
    }

    pub fn cancel() -> Self {
        Self {
            status: Some(RegistrationStatus::Cancelled),
            ..Default::default()
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationStatus::Registered => write!(f, "registered"),
            RegistrationStatus::Attended => write!(f, "attended"),
            RegistrationStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for RegistrationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "registered" => Ok(RegistrationStatus::Registered),
            "attended" => Ok(RegistrationStatus::Attended),
            "cancelled" => Ok(RegistrationStatus::Cancelled),
            other => Err(format!("Unknown registration status '{}'", other)),
        }
    }
}
