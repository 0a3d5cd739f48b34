//! Command handlers module
//!
//! Every console view is a command typed at the prompt. Handlers call the
//! data service or the session manager and return the text to print.

pub mod start;
pub mod help;
pub mod auth;
pub mod profile;
pub mod dashboard;
pub mod events;
pub mod tickets;
pub mod registrations;
pub mod invitations;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing::{debug, error};
use uuid::Uuid;
use crate::handlers::form::FormState;
use crate::models::event::{EventStatus, EventType};
use crate::models::user::OAuthProvider;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::helpers::split_command_line;

/// Prompt shown before each console line
pub const PROMPT: &str = "eventichub> ";

/// Text shown by protected views when nobody is signed in
pub const SIGN_IN_REQUIRED: &str = "Please sign in to continue. Use `login <email> <password>` or `oauth`.";

/// One line typed at the console
#[derive(Debug, Parser)]
#[command(name = "eventichub", no_binary_name = true, disable_help_subcommand = true, disable_version_flag = true)]
pub struct ConsoleLine {
    #[command(subcommand)]
    pub command: Command,
}

/// All available console commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the landing page
    Home,
    /// Create an account
    Signup {
        email: String,
        password: String,
        /// Full name stored with the account
        #[arg(long)]
        name: Option<String>,
    },
    /// Sign in with email and password
    Login { email: String, password: String },
    /// Print the URL to sign in with an external provider
    Oauth { provider: Option<OAuthProvider> },
    /// Finish an external sign-in from the URL the browser was sent back to
    Callback { url: String },
    /// Sign out
    Logout,
    /// Show or edit your profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },
    /// Overview of your events
    Dashboard,
    /// Browse and manage events
    Events {
        #[command(subcommand)]
        action: EventAction,
    },
    /// Manage the tickets of an event
    Tickets {
        #[command(subcommand)]
        action: TicketAction,
    },
    /// Register for an event
    Register {
        event_id: Uuid,
        #[arg(long)]
        ticket: Option<Uuid>,
        /// Attendee name, defaults to your profile name
        #[arg(long)]
        name: Option<String>,
        /// Attendee email, defaults to your account email
        #[arg(long)]
        email: Option<String>,
    },
    /// List your registrations, or the registrations of one of your events
    Registrations {
        #[arg(long)]
        event: Option<Uuid>,
    },
    /// Check an attendee in
    Checkin { registration_id: Uuid },
    /// Cancel a registration
    CancelRegistration { registration_id: Uuid },
    /// Invite someone to an event by email
    Invite { event_id: Uuid, email: String },
    /// Open an invitation link token
    Invitation { token: String },
    /// List invitations sent for an event
    Invitations { event_id: Uuid },
    /// Show available commands
    Help,
    /// Leave the console
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    Show,
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        website: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum EventAction {
    /// Published public events
    Public,
    /// Events you created
    Mine,
    /// One event with tickets and attendees
    Show { id: Uuid },
    Create(EventFields),
    Update {
        id: Uuid,
        #[command(flatten)]
        fields: EventPatch,
    },
    Delete { id: Uuid },
}

#[derive(Debug, clap::Args)]
pub struct EventFields {
    #[arg(long)]
    pub title: String,
    #[arg(long = "type")]
    pub event_type: EventType,
    /// RFC 3339 timestamp, e.g. 2025-01-01T10:00:00Z
    #[arg(long)]
    pub start: DateTime<Utc>,
    #[arg(long)]
    pub end: DateTime<Utc>,
    #[arg(long, default_value = "UTC")]
    pub timezone: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub max_attendees: Option<i32>,
    /// Hide the event from the public listing
    #[arg(long)]
    pub private: bool,
    #[arg(long, default_value = "draft")]
    pub status: EventStatus,
    #[arg(long)]
    pub cover: Option<String>,
    #[arg(long)]
    pub venue: Option<String>,
    #[arg(long)]
    pub meeting_id: Option<String>,
    #[arg(long)]
    pub meeting_url: Option<String>,
}

#[derive(Debug, clap::Args)]
pub struct EventPatch {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long = "type")]
    pub event_type: Option<EventType>,
    #[arg(long)]
    pub start: Option<DateTime<Utc>>,
    #[arg(long)]
    pub end: Option<DateTime<Utc>>,
    #[arg(long)]
    pub timezone: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub max_attendees: Option<i32>,
    #[arg(long)]
    pub public: Option<bool>,
    #[arg(long)]
    pub status: Option<EventStatus>,
    #[arg(long)]
    pub cover: Option<String>,
    #[arg(long)]
    pub venue: Option<String>,
    #[arg(long)]
    pub meeting_id: Option<String>,
    #[arg(long)]
    pub meeting_url: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum TicketAction {
    List { event_id: Uuid },
    Create {
        event_id: Uuid,
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 0.0)]
        price: f64,
        #[arg(long)]
        quantity: i32,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        sale_start: Option<DateTime<Utc>>,
        #[arg(long)]
        sale_end: Option<DateTime<Utc>>,
        /// Create the ticket without putting it on sale
        #[arg(long)]
        inactive: bool,
    },
    Update {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        quantity: Option<i32>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        sale_start: Option<DateTime<Utc>>,
        #[arg(long)]
        sale_end: Option<DateTime<Utc>>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete { id: Uuid },
}

/// What the console loop should do after a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

/// Console session: the services plus the state of the auth forms
#[derive(Debug)]
pub struct Console {
    services: ServiceFactory,
    default_provider: OAuthProvider,
    form: FormState,
}

impl Console {
    pub fn new(services: ServiceFactory, default_provider: OAuthProvider) -> Self {
        Self {
            services,
            default_provider,
            form: FormState::default(),
        }
    }

    pub fn services(&self) -> &ServiceFactory {
        &self.services
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Parse and run one console line
    pub async fn handle_line(&mut self, line: &str) -> Reply {
        let words = split_command_line(line);
        if words.is_empty() {
            return Reply::Text(String::new());
        }

        let parsed = match ConsoleLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(e) => return Reply::Text(e.render().to_string()),
        };

        debug!(command = ?parsed.command, "Handling console command");

        if matches!(parsed.command, Command::Quit) {
            return Reply::Quit;
        }

        match self.handle_command(parsed.command).await {
            Ok(text) => Reply::Text(text),
            Err(e) => {
                error!(error = %e, "Command failed");
                Reply::Text(format!("Error: {}", e.display_message()))
            }
        }
    }

    /// Main command dispatcher
    pub async fn handle_command(&mut self, command: Command) -> Result<String> {
        let services = &self.services;

        match command {
            Command::Home => Ok(start::render_home()),
            Command::Help => Ok(help::render_help()),
            Command::Quit => Ok("Goodbye!".to_string()),
            Command::Signup { email, password, name } => {
                auth::handle_signup(services, &mut self.form, &email, &password, name.as_deref()).await
            }
            Command::Login { email, password } => {
                auth::handle_login(services, &mut self.form, &email, &password).await
            }
            Command::Oauth { provider } => {
                auth::handle_oauth(services, &mut self.form, provider.unwrap_or(self.default_provider))
            }
            Command::Callback { url } => auth::handle_callback(services, &mut self.form, &url).await,
            Command::Logout => auth::handle_logout(services).await,
            Command::Profile { action } => profile::handle_profile(services, action).await,
            Command::Dashboard => dashboard::handle_dashboard(services).await,
            Command::Events { action } => events::handle_events(services, action).await,
            Command::Tickets { action } => tickets::handle_tickets(services, action).await,
            Command::Register { event_id, ticket, name, email } => {
                registrations::handle_register(services, event_id, ticket, name, email).await
            }
            Command::Registrations { event } => registrations::handle_registrations(services, event).await,
            Command::Checkin { registration_id } => registrations::handle_checkin(services, registration_id).await,
            Command::CancelRegistration { registration_id } => {
                registrations::handle_cancel(services, registration_id).await
            }
            Command::Invite { event_id, email } => invitations::handle_invite(services, event_id, &email).await,
            Command::Invitation { token } => invitations::handle_invitation(services, &token).await,
            Command::Invitations { event_id } => invitations::handle_invitations(services, event_id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn parse(line: &str) -> std::result::Result<ConsoleLine, clap::Error> {
        ConsoleLine::try_parse_from(split_command_line(line))
    }

    #[test]
    fn test_parse_login() {
        let line = parse("login ada@example.com 's3cret pass'").unwrap();
        assert_matches!(line.command, Command::Login { email, password } => {
            assert_eq!(email, "ada@example.com");
            assert_eq!(password, "s3cret pass");
        });
    }

    #[test]
    fn test_parse_event_create() {
        let line = parse(
            "events create --title Launch --type virtual --start 2025-01-01T10:00:00Z --end 2025-01-01T12:00:00Z",
        )
        .unwrap();

        assert_matches!(line.command, Command::Events { action: EventAction::Create(fields) } => {
            assert_eq!(fields.title, "Launch");
            assert_eq!(fields.event_type, EventType::Virtual);
            assert_eq!(fields.timezone, "UTC");
            assert_eq!(fields.status, EventStatus::Draft);
            assert!(!fields.private);
        });
    }

    #[test]
    fn test_parse_kebab_case_and_alias() {
        let id = Uuid::new_v4();
        let line = parse(&format!("cancel-registration {}", id)).unwrap();
        assert_matches!(line.command, Command::CancelRegistration { registration_id } if registration_id == id);

        assert_matches!(parse("exit").unwrap().command, Command::Quit);
        assert_matches!(parse("help").unwrap().command, Command::Help);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("events show not-a-uuid").is_err());
        assert!(parse("oauth myspace").is_err());
        assert!(parse("teleport").is_err());
    }
}
