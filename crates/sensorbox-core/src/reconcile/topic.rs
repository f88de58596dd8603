// Topic hierarchy reconciliation.
//
// Every role's topic is created once with its schema and refreshed
// (name and description only) on every later pass. A gases topic whose
// remote schema differs from the local calibration is reported, never
// rewritten.

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use super::{Action, Outcome, Reconcile, reconcile};
use crate::derive::{DesiredState, TopicRole, TopicSchema};
use crate::document::Project;
use crate::error::CoreError;
use crate::model::{NewTopic, Topic, TopicInfo, TopicUpdate};
use crate::registry::Registry;
use crate::store::ConfStore;

/// Remote gases topic schema disagrees with the local gas channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SchemaMismatch {
    pub path: String,
    pub remote_schema_id: Option<String>,
    pub local_schema_id: String,
}

impl fmt::Display for SchemaMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "existing gases schema ({}) does not match device gases schema ({})",
            self.remote_schema_id.as_deref().unwrap_or("none"),
            self.local_schema_id
        )
    }
}

/// Per-role result of a provisioning pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TopicOutcome {
    pub role: TopicRole,
    pub path: String,
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_id: Option<String>,
}

/// Result of provisioning every topic of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProvisionReport {
    pub project: Project,
    pub topics: Vec<TopicOutcome>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Builds and refreshes the topic hierarchy of a project.
pub struct TopicReconciler<'a, R> {
    registry: &'a R,
    store: &'a ConfStore,
}

impl<'a, R: Registry> TopicReconciler<'a, R> {
    pub fn new(registry: &'a R, store: &'a ConfStore) -> Self {
        Self { registry, store }
    }

    /// Compare the remote gases topic, if any, with the local schema.
    pub async fn check_gases_schema(
        &self,
        project: &Project,
        desired: &DesiredState,
    ) -> Result<Option<SchemaMismatch>, CoreError> {
        let path = project.topic_path(TopicRole::Gases, &desired.box_label);
        let existing = self
            .registry
            .find_topics_for_org(&project.org_id, &path)
            .await?
            .into_iter()
            .find(|t| t.path == path);

        Ok(existing.and_then(|topic| {
            (topic.schema_id.as_deref() != Some(desired.gases.schema_id.as_str())).then(|| {
                SchemaMismatch {
                    path,
                    remote_schema_id: topic.schema_id,
                    local_schema_id: desired.gases.schema_id.clone(),
                }
            })
        }))
    }

    /// Create the topic at `path`, or refresh its name and description.
    pub async fn construct_topic(
        &self,
        path: &str,
        schema: &TopicSchema,
    ) -> Result<Outcome<Topic>, CoreError> {
        let target = TopicTarget {
            registry: self.registry,
            path,
        };
        reconcile(&target, schema).await
    }

    /// Converge every topic the device needs, then save the project.
    ///
    /// The schema check runs before anything is written.
    pub async fn provision(
        &self,
        project: &Project,
        desired: &DesiredState,
    ) -> Result<ProvisionReport, CoreError> {
        let mut warnings = Vec::new();
        if let Some(mismatch) = self.check_gases_schema(project, desired).await? {
            warn!(path = %mismatch.path, "{mismatch}");
            warnings.push(mismatch.to_string());
        }

        let mut topics = Vec::new();
        for role in desired.roles() {
            let path = project.topic_path(role, &desired.box_label);
            let outcome = self.construct_topic(&path, &desired.schema(role)).await?;
            info!(%role, path = %path, action = %outcome.action(), "topic converged");
            topics.push(TopicOutcome {
                role,
                action: outcome.action(),
                schema_id: outcome.into_inner().schema_id,
                path,
            });
        }

        self.store.save(project)?;

        Ok(ProvisionReport {
            project: project.clone(),
            topics,
            warnings,
        })
    }

    /// Paths of the project's topics that currently exist remotely.
    pub async fn found_topics(
        &self,
        project: &Project,
        desired: &DesiredState,
    ) -> Result<Vec<(TopicRole, String)>, CoreError> {
        let mut found = Vec::new();
        for role in desired.roles() {
            let path = project.topic_path(role, &desired.box_label);
            if let Some(topic) = self.registry.find_topic(&path).await? {
                found.push((role, topic.path));
            }
        }
        Ok(found)
    }
}

/// One topic path, reconciled against a schema.
struct TopicTarget<'a, R> {
    registry: &'a R,
    path: &'a str,
}

impl<R: Registry> Reconcile for TopicTarget<'_, R> {
    type Entity = Topic;
    type Desired = TopicSchema;

    async fn find(&self) -> Result<Option<Topic>, CoreError> {
        self.registry.find_topic(self.path).await
    }

    async fn create(&self, schema: &TopicSchema) -> Result<Topic, CoreError> {
        let topic = NewTopic {
            path: self.path.to_owned(),
            name: schema.name.clone(),
            description: schema.description.clone(),
            is_public: true,
            info: TopicInfo::json(),
            contributors_can_read: true,
            schema_id: schema.schema_id.clone(),
        };
        self.registry.create_topic(&topic).await
    }

    async fn update(&self, current: &Topic, schema: &TopicSchema) -> Result<Option<Topic>, CoreError> {
        let update = TopicUpdate {
            name: schema.name.clone(),
            description: schema.description.clone(),
            is_public: current.is_public,
            info: current.info.clone(),
        };
        self.registry.update_topic(&current.path, &update).await?;

        Ok(Some(Topic {
            name: update.name,
            description: update.description,
            ..current.clone()
        }))
    }
}
