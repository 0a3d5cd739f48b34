//! Help command handler

/// Render the list of console commands
pub fn render_help() -> String {
    "EventicHub Help\n\n\
     home                                  Show the landing page\n\
     signup <email> <password> [--name]    Create an account\n\
     login <email> <password>              Sign in\n\
     oauth [provider]                      Sign in with google, github, ...\n\
     callback <url>                        Finish an OAuth sign-in\n\
     logout                                Sign out\n\
     profile [show|update]                 Show or edit your profile\n\
     dashboard                             Overview of your events\n\
     events public|mine|show|create|update|delete\n\
     tickets list|create|update|delete\n\
     register <event-id>                   Register for an event\n\
     registrations [--event <id>]          List registrations\n\
     checkin <registration-id>             Check an attendee in\n\
     cancel-registration <registration-id> Cancel a registration\n\
     invite <event-id> <email>             Send an invitation\n\
     invitation <token>                    Open an invitation\n\
     invitations <event-id>                List invitations of an event\n\
     quit                                  Leave the console\n\n\
     Add --help to any command for its options."
        .to_string()
}
