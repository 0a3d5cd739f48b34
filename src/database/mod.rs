//! Database module
//!
//! Access to the hosted backend's tables over its REST gateway

pub mod connection;
pub mod query;
pub mod repositories;
pub mod service;

// Re-export commonly used database components
pub use connection::BackendClient;
pub use query::{Order, QueryBuilder};
pub use repositories::{
    EventRepository, InvitationRepository, ProfileRepository, RegistrationRepository, TicketRepository,
};
pub use service::DataService;
