//! Registration repository implementation

use uuid::Uuid;
use crate::database::connection::BackendClient;
use crate::database::query::Order;
use crate::models::registration::{
    CreateRegistrationRequest, Registration, RegistrationWithDetails, UpdateRegistrationRequest,
};
use crate::utils::errors::Result;

const TABLE: &str = "registrations";

/// Event and ticket columns shown next to a user's registrations
pub const USER_REGISTRATIONS: &str = "*, events (id, title, start_date, end_date, event_type, \
    cover_image_url, venue_address, zoom_meeting_url), tickets (name, price)";

#[derive(Debug, Clone)]
pub struct RegistrationRepository {
    client: BackendClient,
}

impl RegistrationRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Register an attendee for an event.
    ///
    /// Ticket sold counts are maintained by the backend; re-fetch the event
    /// to see them change.
    pub async fn create(&self, request: &CreateRegistrationRequest) -> Result<Registration> {
        self.client.from(TABLE).insert_one(request).await
    }

    /// Registrations of a user, most recent first
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<RegistrationWithDetails>> {
        self.client
            .from(TABLE)
            .select(USER_REGISTRATIONS)
            .eq("user_id", user_id)
            .order("registration_date", Order::Descending)
            .fetch()
            .await
    }

    /// Registrations for an event, most recent first
    pub async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<Registration>> {
        self.client
            .from(TABLE)
            .select("*")
            .eq("event_id", event_id)
            .order("registration_date", Order::Descending)
            .fetch()
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Registration> {
        self.client.from(TABLE).select("*").eq("id", id).fetch_one().await
    }

    pub async fn update(&self, id: Uuid, request: &UpdateRegistrationRequest) -> Result<Registration> {
        self.client.from(TABLE).eq("id", id).update_one(request).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.client.from(TABLE).eq("id", id).delete().await
    }
}
