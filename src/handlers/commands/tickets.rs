//! Ticket command handlers

use tracing::info;
use crate::models::ticket::{CreateTicketRequest, Ticket, UpdateTicketRequest};
use crate::services::ServiceFactory;
use crate::utils::errors::{EventicHubError, Result};
use crate::utils::helpers::{format_price, format_timestamp};
use super::{TicketAction, SIGN_IN_REQUIRED};

pub async fn handle_tickets(services: &ServiceFactory, action: TicketAction) -> Result<String> {
    if !matches!(action, TicketAction::List { .. }) && services.session.require_user().await.is_err() {
        return Ok(SIGN_IN_REQUIRED.to_string());
    }

    match action {
        TicketAction::List { event_id } => {
            let tickets = services.data.tickets.list_for_event(event_id).await?;
            Ok(render_tickets(&tickets))
        }
        TicketAction::Create {
            event_id,
            name,
            price,
            quantity,
            description,
            sale_start,
            sale_end,
            inactive,
        } => {
            let request = CreateTicketRequest {
                event_id,
                name,
                description,
                price,
                quantity_total: quantity,
                quantity_sold: 0,
                sale_start_date: sale_start,
                sale_end_date: sale_end,
                is_active: !inactive,
            };
            let ticket = services.data.tickets.create(&request).await?;

            info!(ticket_id = %ticket.id, event_id = %event_id, "Ticket created");
            Ok(format!("Ticket created: {} ({})", ticket.name, ticket.id))
        }
        TicketAction::Update {
            id,
            name,
            price,
            quantity,
            description,
            sale_start,
            sale_end,
            active,
        } => {
            let patch = UpdateTicketRequest {
                name,
                description,
                price,
                quantity_total: quantity,
                sale_start_date: sale_start,
                sale_end_date: sale_end,
                is_active: active,
            };
            if patch.is_empty() {
                return Err(EventicHubError::InvalidInput("Nothing to update".to_string()));
            }
            let ticket = services.data.tickets.update(id, &patch).await?;

            info!(ticket_id = %ticket.id, "Ticket updated");
            Ok(format!("Ticket updated: {} ({})", ticket.name, ticket.id))
        }
        TicketAction::Delete { id } => {
            services.data.tickets.delete(id).await?;

            info!(ticket_id = %id, "Ticket deleted");
            Ok(format!("Ticket {} deleted.", id))
        }
    }
}

pub fn render_tickets(tickets: &[Ticket]) -> String {
    if tickets.is_empty() {
        return "No tickets for this event.".to_string();
    }

    tickets
        .iter()
        .map(|ticket| {
            let window = match (ticket.sale_start_date, ticket.sale_end_date) {
                (Some(start), Some(end)) => format!(", on sale {} to {}", format_timestamp(start), format_timestamp(end)),
                (Some(start), None) => format!(", on sale from {}", format_timestamp(start)),
                (None, Some(end)) => format!(", on sale until {}", format_timestamp(end)),
                (None, None) => String::new(),
            };
            format!(
                "{}  {} {}, {}/{} sold{}{}",
                ticket.id,
                ticket.name,
                format_price(ticket.price),
                ticket.quantity_sold,
                ticket.quantity_total,
                window,
                if ticket.is_active { "" } else { " (inactive)" }
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
