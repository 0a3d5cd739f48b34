//! Event command handlers

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;
use crate::models::event::{CreateEventRequest, EventWithDetails, OwnedEvent, PublicEvent, UpdateEventRequest};
use crate::services::ServiceFactory;
use crate::utils::errors::{EventicHubError, Result};
use crate::utils::helpers::{format_price, format_timestamp, truncate_text};
use super::{EventAction, EventFields, EventPatch, SIGN_IN_REQUIRED};

pub async fn handle_events(services: &ServiceFactory, action: EventAction) -> Result<String> {
    match action {
        EventAction::Public => {
            let events = services.data.events.list_public().await?;
            Ok(render_public_events(&events))
        }
        EventAction::Show { id } => {
            let event = services.data.events.get(id).await?;
            Ok(render_event_details(&event))
        }
        EventAction::Mine => {
            let Ok(user) = services.session.require_user().await else {
                return Ok(SIGN_IN_REQUIRED.to_string());
            };
            let events = services.data.events.list_by_owner(user.id).await?;
            Ok(render_owned_events(&events, Utc::now()))
        }
        EventAction::Create(fields) => {
            let Ok(user) = services.session.require_user().await else {
                return Ok(SIGN_IN_REQUIRED.to_string());
            };
            let request = create_request(fields, user.id);
            let event = services.data.events.create(&request).await?;

            info!(event_id = %event.id, user_id = %user.id, "Event created");
            Ok(format!("Event created: {} ({})", event.title, event.id))
        }
        EventAction::Update { id, fields } => {
            if services.session.require_user().await.is_err() {
                return Ok(SIGN_IN_REQUIRED.to_string());
            }
            let patch = update_request(fields);
            if patch.is_empty() {
                return Err(EventicHubError::InvalidInput("Nothing to update".to_string()));
            }
            let event = services.data.events.update(id, &patch).await?;

            info!(event_id = %event.id, "Event updated");
            Ok(format!("Event updated: {} ({})", event.title, event.id))
        }
        EventAction::Delete { id } => {
            if services.session.require_user().await.is_err() {
                return Ok(SIGN_IN_REQUIRED.to_string());
            }
            services.data.events.delete(id).await?;

            info!(event_id = %id, "Event deleted");
            Ok(format!("Event {} deleted.", id))
        }
    }
}

fn create_request(fields: EventFields, created_by: Uuid) -> CreateEventRequest {
    CreateEventRequest {
        title: fields.title,
        description: fields.description,
        event_type: fields.event_type,
        start_date: fields.start,
        end_date: fields.end,
        timezone: fields.timezone,
        max_attendees: fields.max_attendees,
        is_public: !fields.private,
        status: fields.status,
        cover_image_url: fields.cover,
        venue_address: fields.venue,
        zoom_meeting_id: fields.meeting_id,
        zoom_meeting_url: fields.meeting_url,
        created_by,
    }
}

fn update_request(fields: EventPatch) -> UpdateEventRequest {
    UpdateEventRequest {
        title: fields.title,
        description: fields.description,
        event_type: fields.event_type,
        start_date: fields.start,
        end_date: fields.end,
        timezone: fields.timezone,
        max_attendees: fields.max_attendees,
        is_public: fields.public,
        status: fields.status,
        cover_image_url: fields.cover,
        venue_address: fields.venue,
        zoom_meeting_id: fields.meeting_id,
        zoom_meeting_url: fields.meeting_url,
    }
}

pub fn render_public_events(events: &[PublicEvent]) -> String {
    if events.is_empty() {
        return "No upcoming public events.".to_string();
    }

    let mut lines = vec!["Upcoming events".to_string()];
    for public in events {
        let event = &public.event;
        let organizer = public
            .organizer
            .as_ref()
            .and_then(|o| o.full_name.as_deref())
            .unwrap_or("Unknown organizer");
        let cheapest = public
            .tickets
            .iter()
            .map(|t| t.price)
            .fold(None, |min: Option<f64>, price| Some(min.map_or(price, |m| m.min(price))));

        lines.push(format!(
            "  {}  {} ({}) by {}, {}, from {}",
            event.id,
            truncate_text(&event.title, 40),
            event.event_type,
            organizer,
            format_timestamp(event.start_date),
            cheapest.map(format_price).unwrap_or_else(|| "no tickets".to_string())
        ));
    }
    lines.join("\n")
}

pub fn render_owned_events(events: &[OwnedEvent], now: DateTime<Utc>) -> String {
    if events.is_empty() {
        return "You have not created any events yet.".to_string();
    }

    let mut lines = vec!["Your events".to_string()];
    for owned in events {
        let event = &owned.event;
        let sold: i32 = owned.tickets.iter().map(|t| t.quantity_sold).sum();
        let total: i32 = owned.tickets.iter().map(|t| t.quantity_total).sum();
        let upcoming = if event.is_upcoming(now) { "upcoming" } else { "past" };

        lines.push(format!(
            "  {}  {} [{}, {}] {} registrations, {}/{} tickets sold",
            event.id,
            truncate_text(&event.title, 40),
            event.status,
            upcoming,
            owned.registrations.len(),
            sold,
            total
        ));
    }
    lines.join("\n")
}

pub fn render_event_details(details: &EventWithDetails) -> String {
    let event = &details.event;
    let mut lines = vec![
        event.title.clone(),
        format!("Type:       {}", event.event_type),
        format!("Status:     {}{}", event.status, if event.is_public { "" } else { " (private)" }),
        format!("Starts:     {}", format_timestamp(event.start_date)),
        format!("Ends:       {}", format_timestamp(event.end_date)),
        format!("Timezone:   {}", event.timezone),
    ];

    if let Some(location) = event.location_line() {
        lines.push(format!("Where:      {}", location));
    }
    if let Some(organizer) = details.organizer.as_ref().and_then(|o| o.full_name.as_deref()) {
        lines.push(format!("Organizer:  {}", organizer));
    }
    if let Some(max) = event.max_attendees {
        lines.push(format!("Capacity:   {}", max));
    }
    if let Some(description) = &event.description {
        lines.push(String::new());
        lines.push(description.clone());
    }

    lines.push(String::new());
    lines.push(format!("Tickets ({})", details.tickets.len()));
    for ticket in &details.tickets {
        lines.push(format!(
            "  {}  {} {}, {} left{}",
            ticket.id,
            ticket.name,
            format_price(ticket.price),
            ticket.remaining(),
            if ticket.is_active { "" } else { " (inactive)" }
        ));
    }

    lines.push(String::new());
    lines.push(format!("Attendees ({})", details.registrations.len()));
    for attendee in &details.registrations {
        lines.push(format!(
            "  {} <{}> {}",
            attendee.attendee_name, attendee.attendee_email, attendee.status
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::{EventStatus, EventType};

    #[test]
    fn test_create_request_from_fields() {
        let start: DateTime<Utc> = "2025-01-01T10:00:00Z".parse().unwrap();
        let owner = Uuid::new_v4();
        let fields = EventFields {
            title: "Launch".to_string(),
            event_type: EventType::Virtual,
            start,
            end: start,
            timezone: "UTC".to_string(),
            description: None,
            max_attendees: None,
            private: true,
            status: EventStatus::Published,
            cover: None,
            venue: None,
            meeting_id: None,
            meeting_url: Some("https://zoom.us/j/1".to_string()),
        };

        let request = create_request(fields, owner);
        assert_eq!(request.created_by, owner);
        assert!(!request.is_public);
        assert_eq!(request.zoom_meeting_url.as_deref(), Some("https://zoom.us/j/1"));
    }

    #[test]
    fn test_render_event_details() {
        let json = r#"{
            "id": "4b7a4f6e-2f0c-4a51-9d1e-6a1d2c3b4a59",
            "title": "Launch",
            "description": "Product launch",
            "event_type": "physical",
            "start_date": "2025-01-01T10:00:00+00:00",
            "end_date": "2025-01-01T12:00:00+00:00",
            "timezone": "UTC",
            "max_attendees": null,
            "is_public": false,
            "status": "draft",
            "cover_image_url": null,
            "venue_address": "1 Main St",
            "zoom_meeting_id": null,
            "zoom_meeting_url": null,
            "created_by": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "created_at": "2024-12-01T09:00:00+00:00",
            "updated_at": "2024-12-01T09:00:00+00:00",
            "profiles": {"full_name": "Ada Lovelace", "avatar_url": null, "company": null},
            "tickets": [{
                "id": "0f8e2a4c-1d3b-4e5f-8a9b-0c1d2e3f4a5b",
                "event_id": "4b7a4f6e-2f0c-4a51-9d1e-6a1d2c3b4a59",
                "name": "General",
                "description": null,
                "price": 25,
                "quantity_total": 10,
                "quantity_sold": 4,
                "sale_start_date": null,
                "sale_end_date": null,
                "is_active": true,
                "created_at": "2024-12-01T09:00:00+00:00"
            }],
            "registrations": [{
                "id": "9a1b2c3d-4e5f-4a6b-8c7d-0e1f2a3b4c5d",
                "attendee_name": "Grace Hopper",
                "attendee_email": "grace@example.com",
                "status": "registered",
                "registration_date": "2024-12-02T09:00:00+00:00",
                "profiles": null
            }]
        }"#;
        let details: EventWithDetails = serde_json::from_str(json).unwrap();

        let text = render_event_details(&details);
        assert!(text.starts_with("Launch\n"));
        assert!(text.contains("Status:     draft (private)"));
        assert!(text.contains("Where:      1 Main St"));
        assert!(text.contains("Organizer:  Ada Lovelace"));
        assert!(text.contains("General $25.00, 6 left"));
        assert!(text.contains("Grace Hopper <grace@example.com> registered"));
    }

    #[test]
    fn test_render_empty_listings() {
        assert_eq!(render_public_events(&[]), "No upcoming public events.");
        assert_eq!(render_owned_events(&[], Utc::now()), "You have not created any events yet.");
    }
}
