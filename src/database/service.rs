//! Data service layer
//!
//! Bundles one repository per remote table behind a single handle

use crate::database::connection::BackendClient;
use crate::database::repositories::{
    EventRepository, InvitationRepository, ProfileRepository, RegistrationRepository, TicketRepository,
};

#[derive(Debug, Clone)]
pub struct DataService {
    pub events: EventRepository,
    pub tickets: TicketRepository,
    pub registrations: RegistrationRepository,
    pub profiles: ProfileRepository,
    pub invitations: InvitationRepository,
}

impl DataService {
    pub fn new(client: BackendClient) -> Self {
        Self {
            events: EventRepository::new(client.clone()),
            tickets: TicketRepository::new(client.clone()),
            registrations: RegistrationRepository::new(client.clone()),
            profiles: ProfileRepository::new(client.clone()),
            invitations: InvitationRepository::new(client),
        }
    }
}
