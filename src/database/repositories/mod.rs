//! Table repositories module
//!
//! One repository per remote table; each method is a single request

pub mod event;
pub mod ticket;
pub mod registration;
pub mod profile;
pub mod invitation;

// Re-export repositories
pub use event::EventRepository;
pub use ticket::TicketRepository;
pub use registration::RegistrationRepository;
pub use profile::ProfileRepository;
pub use invitation::InvitationRepository;
