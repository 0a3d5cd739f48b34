//! Profile repository implementation
//!
//! Profile rows are created by the backend when an identity signs up and are
//! removed together with it, so only reads and updates exist here.

use uuid::Uuid;
use crate::database::connection::BackendClient;
use crate::models::profile::{Profile, UpdateProfileRequest};
use crate::utils::errors::Result;

const TABLE: &str = "profiles";

#[derive(Debug, Clone)]
pub struct ProfileRepository {
    client: BackendClient,
}

impl ProfileRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, user_id: Uuid) -> Result<Profile> {
        self.client.from(TABLE).select("*").eq("id", user_id).fetch_one().await
    }

    pub async fn update(&self, user_id: Uuid, request: &UpdateProfileRequest) -> Result<Profile> {
        self.client.from(TABLE).eq("id", user_id).update_one(request).await
    }
}
