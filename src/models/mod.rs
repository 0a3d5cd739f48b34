//! Data models module
//!
//! Types mirroring the remote schema, plus the request bodies sent to it

pub mod user;
pub mod profile;
pub mod event;
pub mod ticket;
pub mod registration;
pub mod invitation;

// Re-export commonly used models
pub use user::{AuthUser, UserMetadata, Session, SignUpResponse, AuthChange, AuthChangeEvent, OAuthProvider};
pub use profile::{Profile, ProfileSummary, UpdateProfileRequest};
pub use event::{Event, EventType, EventStatus, PublicEvent, OwnedEvent, EventWithDetails, EventSummary, CreateEventRequest, UpdateEventRequest};
pub use ticket::{Ticket, TicketSummary, TicketPrice, CreateTicketRequest, UpdateTicketRequest};
pub use registration::{Registration, RegistrationStatus, RegistrationSummary, AttendeeEntry, RegistrationWithDetails, CreateRegistrationRequest, UpdateRegistrationRequest};
pub use invitation::{Invitation, InvitationStatus, InvitationWithEvent, CreateInvitationRequest, UpdateInvitationRequest};
