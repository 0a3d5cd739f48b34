//! Landing page

/// Render the landing page with the platform's features
pub fn render_home() -> String {
    "Event Management Platform\n\
     Create, manage, and host amazing events with our comprehensive platform\n\n\
     Guest Management      Manage attendees and track RSVPs\n\
     Ticketing             Create and sell event tickets\n\
     Invites & Reminders   Send invitations and automated reminders\n\
     Event Calendar        Schedule and view all your events\n\n\
     Type `login` or `signup` to get started, or `help` for all commands."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_lists_features() {
        let home = render_home();
        assert!(home.starts_with("Event Management Platform"));
        for feature in ["Guest Management", "Ticketing", "Invites & Reminders", "Event Calendar"] {
            assert!(home.contains(feature), "missing {}", feature);
        }
    }
}
