//! Invitation repository implementation

use uuid::Uuid;
use crate::database::connection::BackendClient;
use crate::database::query::Order;
use crate::models::invitation::{
    CreateInvitationRequest, Invitation, InvitationWithEvent, UpdateInvitationRequest,
};
use crate::utils::errors::Result;

const TABLE: &str = "invitations";

/// Event columns shown on the invitation landing view
pub const INVITED_EVENT: &str = "*, events (id, title, description, start_date, end_date, \
    event_type, venue_address, cover_image_url)";

#[derive(Debug, Clone)]
pub struct InvitationRepository {
    client: BackendClient,
}

impl InvitationRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, request: &CreateInvitationRequest) -> Result<Invitation> {
        self.client.from(TABLE).insert_one(request).await
    }

    /// Look up an invitation by the token from its link
    pub async fn get_by_token(&self, token: &str) -> Result<InvitationWithEvent> {
        self.client
            .from(TABLE)
            .select(INVITED_EVENT)
            .eq("invite_token", token)
            .fetch_one()
            .await
    }

    /// Invitations sent for an event, most recent first
    pub async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<Invitation>> {
        self.client
            .from(TABLE)
            .select("*")
            .eq("event_id", event_id)
            .order("sent_at", Order::Descending)
            .fetch()
            .await
    }

    pub async fn update(&self, id: Uuid, request: &UpdateInvitationRequest) -> Result<Invitation> {
        self.client.from(TABLE).eq("id", id).update_one(request).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.client.from(TABLE).eq("id", id).delete().await
    }
}
