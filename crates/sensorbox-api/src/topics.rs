// Registry topic endpoints
//
// Topics are keyed by their full hierarchical path, which is sent as a
// single percent-encoded segment.

use tracing::debug;

use crate::client::{RegistryClient, encode_segment};
use crate::error::Error;
use crate::types::{TopicRequest, TopicResponse};

impl RegistryClient {
    /// Get a topic by path.
    ///
    /// `GET /v2/topics/{path}` -- a 404 yields `None`.
    pub async fn find_topic(&self, path: &str) -> Result<Option<TopicResponse>, Error> {
        debug!(path, "finding topic");
        self.get_optional(&format!("v2/topics/{}", encode_segment(path)))
            .await
    }

    /// List an organisation's topics whose path starts with `path`.
    ///
    /// `GET /v2/orgs/{org_id}/topics?path={path}`
    pub async fn list_topics(&self, org_id: &str, path: &str) -> Result<Vec<TopicResponse>, Error> {
        debug!(org_id, path, "listing topics");
        self.get_with_params(
            &format!("v2/orgs/{}/topics", encode_segment(org_id)),
            &[("path", path.to_owned())],
        )
        .await
    }

    /// Create a topic.
    ///
    /// `POST /v2/topics`
    pub async fn create_topic(&self, topic: &TopicRequest) -> Result<TopicResponse, Error> {
        debug!(path = ?topic.path, "creating topic");
        self.post("v2/topics", topic).await
    }

    /// Update a topic's metadata.
    ///
    /// `PUT /v2/topics/{path}`
    pub async fn update_topic(&self, path: &str, topic: &TopicRequest) -> Result<(), Error> {
        debug!(path, "updating topic");
        self.put(&format!("v2/topics/{}", encode_segment(path)), topic)
            .await
    }
}
