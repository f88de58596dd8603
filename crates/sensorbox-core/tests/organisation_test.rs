#![allow(clippy::unwrap_used)]
// Organisation reconciliation against the in-memory registry.

mod common;

use pretty_assertions::assert_eq;

use common::{FakeRegistry, ORG};
use sensorbox_core::{Action, CoreError, Organisation, OrganisationReconciler, OrganisationUpdate};

fn full_fields() -> OrganisationUpdate {
    OrganisationUpdate {
        name: Some("Acme".into()),
        website: Some("https://acme.test".into()),
        description: Some("Air quality".into()),
        email: Some("ops@acme.test".into()),
    }
}

fn existing(name: &str) -> Organisation {
    Organisation {
        org_id: ORG.into(),
        name: name.into(),
        website: "https://acme.test".into(),
        description: "Air quality".into(),
        email: "old@acme.test".into(),
    }
}

#[tokio::test]
async fn create_then_query_returns_same_org() {
    let registry = FakeRegistry::new();
    let reconciler = OrganisationReconciler::new(&registry, ORG);

    let created = reconciler.ensure(&full_fields()).await.unwrap();
    assert_eq!(created.action(), Action::Created);
    assert_eq!(created.entity().org_id, ORG);

    let queried = reconciler
        .ensure(&OrganisationUpdate::default())
        .await
        .unwrap();
    assert_eq!(queried.action(), Action::Unchanged);
    assert_eq!(queried.entity().org_id, ORG);
    assert_eq!(registry.creates(), 1);
    assert_eq!(registry.updates(), 0);
}

#[tokio::test]
async fn partial_update_merges_over_remote() {
    let registry = FakeRegistry::new().with_org(existing("X"));
    let reconciler = OrganisationReconciler::new(&registry, ORG);

    let update = OrganisationUpdate {
        email: Some("y@z".into()),
        ..OrganisationUpdate::default()
    };
    let outcome = reconciler.ensure(&update).await.unwrap();

    assert_eq!(outcome.action(), Action::Updated);
    let org = outcome.into_inner();
    assert_eq!(org.name, "X");
    assert_eq!(org.email, "y@z");
    assert_eq!(registry.updates(), 1);
}

#[tokio::test]
async fn query_without_org_is_incomplete() {
    let registry = FakeRegistry::new();
    let reconciler = OrganisationReconciler::new(&registry, ORG);

    let err = reconciler
        .ensure(&OrganisationUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::IncompleteConfiguration { .. }));
    assert_eq!(registry.writes(), 0);
}

#[tokio::test]
async fn partial_fields_cannot_create() {
    let registry = FakeRegistry::new();
    let reconciler = OrganisationReconciler::new(&registry, ORG);

    let update = OrganisationUpdate {
        name: Some("Acme".into()),
        ..OrganisationUpdate::default()
    };
    let err = reconciler.ensure(&update).await.unwrap_err();
    assert!(matches!(err, CoreError::IncompleteConfiguration { .. }));
    assert_eq!(registry.writes(), 0);
}

#[tokio::test]
async fn identical_fields_write_nothing() {
    let registry = FakeRegistry::new().with_org(existing("X"));
    let reconciler = OrganisationReconciler::new(&registry, ORG);

    let update = OrganisationUpdate {
        name: Some("X".into()),
        ..OrganisationUpdate::default()
    };
    let outcome = reconciler.ensure(&update).await.unwrap();
    assert_eq!(outcome.action(), Action::Unchanged);
    assert_eq!(registry.writes(), 0);
}
