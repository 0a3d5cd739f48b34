//! Ticket model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity_total: i32,
    pub quantity_sold: i32,
    pub sale_start_date: Option<DateTime<Utc>>,
    pub sale_end_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Ticket columns embedded in event listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketSummary {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub quantity_total: i32,
    pub quantity_sold: i32,
}

/// Ticket columns embedded in a user's registrations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketPrice {
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTicketRequest {
    pub event_id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub quantity_total: i32,
    pub quantity_sold: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_end_date: Option<DateTime<Utc>>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTicketRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_total: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UpdateTicketRequest {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl TicketSummary {
    /// Seats left according to the last fetched counts
    pub fn remaining(&self) -> i32 {
        (self.quantity_total - self.quantity_sold).max(0)
    }
}

impl Ticket {
    pub fn remaining(&self) -> i32 {
        (self.quantity_total - self.quantity_sold).max(0)
    }
}
