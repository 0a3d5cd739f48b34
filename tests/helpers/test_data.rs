//! Test data helpers
//!
//! JSON bodies shaped like the hosted backend's responses, with generated
//! names and emails where the value does not matter.

use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::{json, Value};
use uuid::Uuid;

pub fn fake_email() -> String {
    SafeEmail().fake()
}

pub fn fake_name() -> String {
    Name().fake()
}

pub fn user_json(user_id: Uuid, email: &str) -> Value {
    json!({
        "id": user_id,
        "aud": "authenticated",
        "role": "authenticated",
        "email": email,
        "user_metadata": {},
        "created_at": "2025-01-01T10:00:00.000000Z",
        "last_sign_in_at": "2025-01-02T10:00:00.000000Z"
    })
}

pub fn session_json(user_id: Uuid, email: &str, access_token: &str) -> Value {
    json!({
        "access_token": access_token,
        "refresh_token": "refresh-token",
        "token_type": "bearer",
        "expires_in": 3600,
        "expires_at": 1893456000,
        "user": user_json(user_id, email)
    })
}

pub fn profile_json(user_id: Uuid, full_name: &str) -> Value {
    json!({
        "id": user_id,
        "full_name": full_name,
        "avatar_url": null,
        "company": null,
        "website": null,
        "bio": null,
        "created_at": "2025-01-01T10:00:00+00:00",
        "updated_at": "2025-01-01T10:00:00+00:00"
    })
}

pub fn event_json(event_id: Uuid, owner: Uuid, title: &str, start_date: &str) -> Value {
    json!({
        "id": event_id,
        "title": title,
        "description": null,
        "event_type": "virtual",
        "start_date": start_date,
        "end_date": start_date,
        "timezone": "UTC",
        "max_attendees": null,
        "is_public": true,
        "status": "published",
        "cover_image_url": null,
        "venue_address": null,
        "zoom_meeting_id": null,
        "zoom_meeting_url": null,
        "created_by": owner,
        "created_at": "2024-12-01T09:00:00+00:00",
        "updated_at": "2024-12-01T09:00:00+00:00"
    })
}

pub fn registration_json(registration_id: Uuid, event_id: Uuid, name: &str, email: &str) -> Value {
    json!({
        "id": registration_id,
        "event_id": event_id,
        "ticket_id": null,
        "user_id": null,
        "attendee_name": name,
        "attendee_email": email,
        "status": "registered",
        "registration_date": "2025-01-01T10:00:00+00:00",
        "check_in_time": null
    })
}
