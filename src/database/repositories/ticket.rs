//! Ticket repository implementation

use uuid::Uuid;
use crate::database::connection::BackendClient;
use crate::database::query::Order;
use crate::models::ticket::{CreateTicketRequest, Ticket, UpdateTicketRequest};
use crate::utils::errors::Result;

const TABLE: &str = "tickets";

#[derive(Debug, Clone)]
pub struct TicketRepository {
    client: BackendClient,
}

impl TicketRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Tickets of an event in creation order
    pub async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<Ticket>> {
        self.client
            .from(TABLE)
            .select("*")
            .eq("event_id", event_id)
            .order("created_at", Order::Ascending)
            .fetch()
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Ticket> {
        self.client.from(TABLE).select("*").eq("id", id).fetch_one().await
    }

    pub async fn create(&self, request: &CreateTicketRequest) -> Result<Ticket> {
        self.client.from(TABLE).insert_one(request).await
    }

    pub async fn update(&self, id: Uuid, request: &UpdateTicketRequest) -> Result<Ticket> {
        self.client.from(TABLE).eq("id", id).update_one(request).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.client.from(TABLE).eq("id", id).delete().await
    }
}
