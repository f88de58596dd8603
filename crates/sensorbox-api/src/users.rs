// Registry user endpoints

use tracing::debug;

use crate::client::{RegistryClient, encode_segment};
use crate::error::Error;
use crate::types::UserResponse;

impl RegistryClient {
    /// Look up the public profile of a user.
    ///
    /// `GET /v1/public/users/{user_id}` -- a 404 yields `None`.
    pub async fn find_public_user(&self, user_id: &str) -> Result<Option<UserResponse>, Error> {
        debug!(user_id, "finding public user");
        self.get_optional(&format!("v1/public/users/{}", encode_segment(user_id)))
            .await
    }
}
