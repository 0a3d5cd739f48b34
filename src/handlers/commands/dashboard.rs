//! Dashboard view

use chrono::{DateTime, Utc};
use crate::models::event::OwnedEvent;
use crate::models::profile::Profile;
use crate::models::user::AuthUser;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::helpers::{format_relative_time, truncate_text};
use super::SIGN_IN_REQUIRED;

const RECENT_EVENTS: usize = 5;

/// Overview numbers over the signed-in user's events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_events: usize,
    pub total_attendees: usize,
    pub upcoming_events: usize,
}

impl DashboardStats {
    pub fn from_events(events: &[OwnedEvent], now: DateTime<Utc>) -> Self {
        Self {
            total_events: events.len(),
            total_attendees: events.iter().map(|e| e.registrations.len()).sum(),
            upcoming_events: events.iter().filter(|e| e.event.is_upcoming(now)).count(),
        }
    }
}

pub async fn handle_dashboard(services: &ServiceFactory) -> Result<String> {
    let user = match services.session.require_user().await {
        Ok(user) => user,
        Err(_) => return Ok(SIGN_IN_REQUIRED.to_string()),
    };

    let profile = services.session.profile().await;
    let events = services.data.events.list_by_owner(user.id).await?;

    Ok(render_dashboard(&user, profile.as_ref(), &events, Utc::now()))
}

/// Greeting name: profile name, else account email
pub fn display_name(user: &AuthUser, profile: Option<&Profile>) -> String {
    let email = user.email.as_deref().unwrap_or_default();
    match profile {
        Some(profile) => profile.display_name(email).to_string(),
        None => email.to_string(),
    }
}

pub fn render_dashboard(user: &AuthUser, profile: Option<&Profile>, events: &[OwnedEvent], now: DateTime<Utc>) -> String {
    let stats = DashboardStats::from_events(events, now);

    let mut text = format!(
        "Welcome, {}\n\n\
         Total Events:     {}\n\
         Total Attendees:  {}\n\
         Upcoming Events:  {}\n\n\
         Recent Events\n",
        display_name(user, profile),
        stats.total_events,
        stats.total_attendees,
        stats.upcoming_events
    );

    if events.is_empty() {
        text.push_str("No events created yet. Create Your First Event with `events create`.");
        return text;
    }

    // list_by_owner returns newest first
    for owned in events.iter().take(RECENT_EVENTS) {
        let event = &owned.event;
        text.push_str(&format!(
            "  {}  {} [{}] {}, {} registered\n",
            event.id,
            truncate_text(&event.title, 40),
            event.status,
            format_relative_time(event.start_date, now),
            owned.registrations.len()
        ));
    }

    text.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;
    use crate::models::event::{Event, EventStatus, EventType};
    use crate::models::registration::{RegistrationStatus, RegistrationSummary};
    use crate::models::user::UserMetadata;

    fn user() -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            email: Some("ada@example.com".to_string()),
            user_metadata: UserMetadata::default(),
            created_at: None,
            last_sign_in_at: None,
        }
    }

    fn owned(title: &str, start: DateTime<Utc>, attendees: usize) -> OwnedEvent {
        OwnedEvent {
            event: Event {
                id: Uuid::new_v4(),
                title: title.to_string(),
                description: None,
                event_type: EventType::Physical,
                start_date: start,
                end_date: start + Duration::hours(2),
                timezone: "UTC".to_string(),
                max_attendees: None,
                is_public: true,
                status: EventStatus::Published,
                cover_image_url: None,
                venue_address: Some("1 Main St".to_string()),
                zoom_meeting_id: None,
                zoom_meeting_url: None,
                created_by: Uuid::new_v4(),
                created_at: start,
                updated_at: start,
            },
            tickets: Vec::new(),
            registrations: (0..attendees)
                .map(|_| RegistrationSummary {
                    id: Uuid::new_v4(),
                    status: RegistrationStatus::Registered,
                })
                .collect(),
        }
    }

    #[test]
    fn test_stats() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let events = vec![
            owned("Future", now + Duration::days(3), 2),
            owned("Past", now - Duration::days(3), 5),
        ];

        let stats = DashboardStats::from_events(&events, now);
        assert_eq!(stats, DashboardStats { total_events: 2, total_attendees: 7, upcoming_events: 1 });
    }

    #[test]
    fn test_greeting_falls_back_to_email() {
        let now = Utc::now();
        let text = render_dashboard(&user(), None, &[], now);
        assert!(text.starts_with("Welcome, ada@example.com"));
        assert!(text.contains("Create Your First Event"));
        assert!(text.contains("Total Events:     0"));
    }
}
