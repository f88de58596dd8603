// ── Reconciliation ──
//
// One routine shared by every entity kind: find the remote entity, create
// it if absent, otherwise converge it towards the desired state. Each
// entity supplies the three steps through `Reconcile`.

mod device;
mod organisation;
mod topic;

use serde::Serialize;
use strum::Display;

use crate::error::CoreError;

pub use device::{DeviceReconciler, DesiredDevice};
pub use organisation::OrganisationReconciler;
pub use topic::{ProvisionReport, SchemaMismatch, TopicOutcome, TopicReconciler};

/// What a reconcile pass did to the remote entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Created,
    Updated,
    Unchanged,
}

/// The converged entity, tagged with the action that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Created(T),
    Updated(T),
    Unchanged(T),
}

impl<T> Outcome<T> {
    pub fn action(&self) -> Action {
        match self {
            Self::Created(_) => Action::Created,
            Self::Updated(_) => Action::Updated,
            Self::Unchanged(_) => Action::Unchanged,
        }
    }

    pub fn entity(&self) -> &T {
        match self {
            Self::Created(e) | Self::Updated(e) | Self::Unchanged(e) => e,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Self::Created(e) | Self::Updated(e) | Self::Unchanged(e) => e,
        }
    }
}

/// The per-entity steps of a reconcile pass.
#[allow(async_fn_in_trait)]
pub trait Reconcile {
    type Entity;
    type Desired;

    /// Current remote state, if the entity exists.
    async fn find(&self) -> Result<Option<Self::Entity>, CoreError>;

    /// Create the entity. Must fail without writing if `desired` is not
    /// enough to create from.
    async fn create(&self, desired: &Self::Desired) -> Result<Self::Entity, CoreError>;

    /// Converge an existing entity. `None` means it already matches and
    /// nothing was written.
    async fn update(
        &self,
        current: &Self::Entity,
        desired: &Self::Desired,
    ) -> Result<Option<Self::Entity>, CoreError>;
}

/// Find, then create or converge.
pub async fn reconcile<R: Reconcile>(
    target: &R,
    desired: &R::Desired,
) -> Result<Outcome<R::Entity>, CoreError> {
    let existing = target.find().await?;
    converge(target, existing, desired).await
}

/// Create or converge from an already-fetched remote state.
pub async fn converge<R: Reconcile>(
    target: &R,
    existing: Option<R::Entity>,
    desired: &R::Desired,
) -> Result<Outcome<R::Entity>, CoreError> {
    match existing {
        None => target.create(desired).await.map(Outcome::Created),
        Some(current) => match target.update(&current, desired).await? {
            Some(updated) => Ok(Outcome::Updated(updated)),
            None => Ok(Outcome::Unchanged(current)),
        },
    }
}
