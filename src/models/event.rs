//! Event model

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use super::profile::ProfileSummary;
use super::registration::{AttendeeEntry, RegistrationSummary};
use super::ticket::{Ticket, TicketSummary};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub event_type: EventType,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub timezone: String,
    pub max_attendees: Option<i32>,
    pub is_public: bool,
    pub status: EventStatus,
    pub cover_image_url: Option<String>,
    pub venue_address: Option<String>,
    pub zoom_meeting_id: Option<String>,
    pub zoom_meeting_url: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Virtual,
    Physical,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Draft,
    Published,
    Cancelled,
}

/// Published public event as listed on the discovery page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicEvent {
    #[serde(flatten)]
    pub event: Event,
    #[serde(rename = "profiles", default)]
    pub organizer: Option<ProfileSummary>,
    #[serde(default)]
    pub tickets: Vec<TicketSummary>,
}

/// Event as listed on its owner's dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedEvent {
    #[serde(flatten)]
    pub event: Event,
    #[serde(default)]
    pub tickets: Vec<TicketSummary>,
    #[serde(default)]
    pub registrations: Vec<RegistrationSummary>,
}

/// Single event with organizer, tickets and attendee list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventWithDetails {
    #[serde(flatten)]
    pub event: Event,
    #[serde(rename = "profiles", default)]
    pub organizer: Option<ProfileSummary>,
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub registrations: Vec<AttendeeEntry>,
}

/// Event columns embedded in registration and invitation queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub event_type: EventType,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub venue_address: Option<String>,
    #[serde(default)]
    pub zoom_meeting_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub event_type: EventType,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub timezone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<i32>,
    pub is_public: bool,
    pub status: EventStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_meeting_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_meeting_url: Option<String>,
    pub created_by: Uuid,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_meeting_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_meeting_url: Option<String>,
}

impl UpdateEventRequest {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Event {
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.start_date > now
    }

    /// Where attendees go: venue, meeting link, or both for hybrid events
    pub fn location_line(&self) -> Option<String> {
        match (self.event_type, &self.venue_address, &self.zoom_meeting_url) {
            (EventType::Physical, Some(venue), _) => Some(venue.clone()),
            (EventType::Virtual, _, Some(url)) => Some(url.clone()),
            (EventType::Hybrid, Some(venue), Some(url)) => Some(format!("{} / {}", venue, url)),
            (_, Some(venue), _) => Some(venue.clone()),
            (_, _, Some(url)) => Some(url.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Virtual => write!(f, "virtual"),
            EventType::Physical => write!(f, "physical"),
            EventType::Hybrid => write!(f, "hybrid"),
        }
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "virtual" => Ok(EventType::Virtual),
            "physical" => Ok(EventType::Physical),
            "hybrid" => Ok(EventType::Hybrid),
            other => Err(format!("Unknown event type '{}' (virtual, physical, hybrid)", other)),
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventStatus::Draft => write!(f, "draft"),
            EventStatus::Published => write!(f, "published"),
            EventStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(EventStatus::Draft),
            "published" => Ok(EventStatus::Published),
            "cancelled" => Ok(EventStatus::Cancelled),
            other => Err(format!("Unknown event status '{}' (draft, published, cancelled)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENT_JSON: &str = r#"{
        "id": "4b7a4f6e-2f0c-4a51-9d1e-6a1d2c3b4a59",
        "title": "Launch",
        "description": null,
        "event_type": "virtual",
        "start_date": "2025-01-01T10:00:00+00:00",
        "end_date": "2025-01-01T12:00:00+00:00",
        "timezone": "UTC",
        "max_attendees": 100,
        "is_public": true,
        "status": "published",
        "cover_image_url": null,
        "venue_address": null,
        "zoom_meeting_id": null,
        "zoom_meeting_url": "https://zoom.us/j/123",
        "created_by": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
        "created_at": "2024-12-01T09:00:00.52+00:00",
        "updated_at": "2024-12-01T09:00:00.52+00:00",
        "profiles": {"full_name": "Ada Lovelace", "avatar_url": null},
        "tickets": [{"id": "0f8e2a4c-1d3b-4e5f-8a9b-0c1d2e3f4a5b", "name": "General", "price": 0, "quantity_total": 100, "quantity_sold": 12}]
    }"#;

    #[test]
    fn test_public_event_embedding() {
        let event: PublicEvent = serde_json::from_str(EVENT_JSON).unwrap();

        assert_eq!(event.event.title, "Launch");
        assert_eq!(event.event.event_type, EventType::Virtual);
        assert_eq!(event.event.status, EventStatus::Published);
        assert_eq!(
            event.organizer.as_ref().and_then(|o| o.full_name.as_deref()),
            Some("Ada Lovelace")
        );
        assert_eq!(event.tickets.len(), 1);
        assert_eq!(event.tickets[0].quantity_sold, 12);
        assert_eq!(event.tickets[0].price, 0.0);
    }

    #[test]
    fn test_update_request_skips_absent_fields() {
        let update = UpdateEventRequest {
            title: Some("Renamed".to_string()),
            status: Some(EventStatus::Cancelled),
            ..Default::default()
        };

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"title": "Renamed", "status": "cancelled"}));
        assert!(!update.is_empty());
        assert!(UpdateEventRequest::default().is_empty());
    }

    #[test]
    fn test_location_line() {
        let mut event: Event = serde_json::from_str::<PublicEvent>(EVENT_JSON).unwrap().event;
        assert_eq!(event.location_line().as_deref(), Some("https://zoom.us/j/123"));

        event.event_type = EventType::Hybrid;
        event.venue_address = Some("1 Main St".to_string());
        assert_eq!(event.location_line().as_deref(), Some("1 Main St / https://zoom.us/j/123"));
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("Hybrid".parse::<EventType>(), Ok(EventType::Hybrid));
        assert_eq!("draft".parse::<EventStatus>(), Ok(EventStatus::Draft));
        assert!("concert".parse::<EventType>().is_err());
    }
}
