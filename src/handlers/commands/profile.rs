//! Profile view

use crate::models::profile::{Profile, UpdateProfileRequest};
use crate::models::user::AuthUser;
use crate::services::ServiceFactory;
use crate::utils::errors::{EventicHubError, Result};
use crate::utils::helpers::format_timestamp;
use super::{ProfileAction, SIGN_IN_REQUIRED};

pub async fn handle_profile(services: &ServiceFactory, action: Option<ProfileAction>) -> Result<String> {
    let user = match services.session.require_user().await {
        Ok(user) => user,
        Err(_) => return Ok(SIGN_IN_REQUIRED.to_string()),
    };

    match action.unwrap_or(ProfileAction::Show) {
        ProfileAction::Show => {
            let profile = services.session.profile().await;
            Ok(render_profile(&user, profile.as_ref()))
        }
        ProfileAction::Update { name, avatar, company, website, bio } => {
            let updates = UpdateProfileRequest {
                full_name: name,
                avatar_url: avatar,
                company,
                website,
                bio,
            };
            if updates == UpdateProfileRequest::default() {
                return Err(EventicHubError::InvalidInput("Nothing to update".to_string()));
            }

            let profile = services.session.update_profile(&updates).await?;
            Ok(format!("Profile updated.\n\n{}", render_profile(&user, Some(&profile))))
        }
    }
}

pub fn render_profile(user: &AuthUser, profile: Option<&Profile>) -> String {
    let email = user.email.as_deref().unwrap_or("-");
    let mut lines = vec![format!("Email:    {}", email)];

    match profile {
        Some(profile) => {
            let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
            lines.push(format!("Name:     {}", field(&profile.full_name)));
            lines.push(format!("Company:  {}", field(&profile.company)));
            lines.push(format!("Website:  {}", field(&profile.website)));
            lines.push(format!("Avatar:   {}", field(&profile.avatar_url)));
            lines.push(format!("Bio:      {}", field(&profile.bio)));
            lines.push(format!("Joined:   {}", format_timestamp(profile.created_at)));
        }
        None => lines.push("No profile found for this account.".to_string()),
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;
    use crate::models::user::UserMetadata;

    #[test]
    fn test_render_profile() {
        let id = Uuid::new_v4();
        let user = AuthUser {
            id,
            email: Some("ada@example.com".to_string()),
            user_metadata: UserMetadata::default(),
            created_at: None,
            last_sign_in_at: None,
        };
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();
        let profile = Profile {
            id,
            full_name: Some("Ada Lovelace".to_string()),
            avatar_url: None,
            company: Some("Analytical Engines".to_string()),
            website: None,
            bio: None,
            created_at: created,
            updated_at: created,
        };

        let text = render_profile(&user, Some(&profile));
        assert!(text.contains("Email:    ada@example.com"));
        assert!(text.contains("Name:     Ada Lovelace"));
        assert!(text.contains("Website:  -"));
        assert!(text.contains("Joined:   2025-01-01 10:00 UTC"));

        assert!(render_profile(&user, None).contains("No profile found"));
    }
}
