//! Event repository implementation

use uuid::Uuid;
use crate::database::connection::BackendClient;
use crate::database::query::Order;
use crate::models::event::{
    CreateEventRequest, Event, EventStatus, EventWithDetails, OwnedEvent, PublicEvent, UpdateEventRequest,
};
use crate::utils::errors::Result;

const TABLE: &str = "events";

/// Organizer and ticket overview for the discovery listing
pub const PUBLIC_LISTING: &str = "*, profiles:created_by (full_name, avatar_url), tickets (id, name, price, quantity_total, quantity_sold)";

/// Ticket and registration overview for the owner's dashboard
pub const OWNER_LISTING: &str = "*, tickets (id, name, price, quantity_total, quantity_sold), registrations (id, status)";

/// Everything shown on a single event page
pub const EVENT_DETAILS: &str = "*, profiles:created_by (full_name, avatar_url, company), tickets (*), \
    registrations (id, attendee_name, attendee_email, status, registration_date, profiles:user_id (full_name, avatar_url))";

#[derive(Debug, Clone)]
pub struct EventRepository {
    client: BackendClient,
}

impl EventRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Published public events, soonest first
    pub async fn list_public(&self) -> Result<Vec<PublicEvent>> {
        self.client
            .from(TABLE)
            .select(PUBLIC_LISTING)
            .eq("is_public", true)
            .eq("status", EventStatus::Published)
            .order("start_date", Order::Ascending)
            .fetch()
            .await
    }

    /// Events created by a user, newest first
    pub async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<OwnedEvent>> {
        self.client
            .from(TABLE)
            .select(OWNER_LISTING)
            .eq("created_by", user_id)
            .order("created_at", Order::Descending)
            .fetch()
            .await
    }

    /// Find event by ID with organizer, tickets and attendees
    pub async fn get(&self, id: Uuid) -> Result<EventWithDetails> {
        self.client
            .from(TABLE)
            .select(EVENT_DETAILS)
            .eq("id", id)
            .fetch_one()
            .await
    }

    /// Create a new event
    pub async fn create(&self, request: &CreateEventRequest) -> Result<Event> {
        self.client.from(TABLE).insert_one(request).await
    }

    /// Update event
    pub async fn update(&self, id: Uuid, request: &UpdateEventRequest) -> Result<Event> {
        self.client.from(TABLE).eq("id", id).update_one(request).await
    }

    /// Delete event
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.client.from(TABLE).eq("id", id).delete().await
    }
}
