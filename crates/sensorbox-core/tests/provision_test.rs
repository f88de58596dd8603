#![allow(clippy::unwrap_used)]
// Topic hierarchy provisioning and the full commissioning sequence.

mod common;

use pretty_assertions::assert_eq;

use common::{BOX_LABEL, FakeRegistry, ORG, afe_calib, opc_conf, populated_store};
use sensorbox_core::model::TopicInfo;
use sensorbox_core::{
    Action, DesiredDevice, DesiredState, DeviceReconciler, DeviceUpdate, Location,
    OrganisationReconciler, OrganisationUpdate, Project, Topic, TopicReconciler, TopicRole,
};

fn project() -> Project {
    Project::construct(ORG, "field-trial", "2").unwrap()
}

fn gases_topic(schema_id: &str) -> Topic {
    Topic {
        path: "/orgs/acme/field-trial/loc/2/gases".into(),
        name: "Old gases".into(),
        description: "old".into(),
        is_public: false,
        info: Some(TopicInfo::json()),
        contributors_can_read: Some(true),
        schema_id: Some(schema_id.into()),
    }
}

#[tokio::test]
async fn provisions_every_role_once() {
    let (_dir, store) = populated_store();
    let registry = FakeRegistry::new();
    let desired = DesiredState::load(&store).unwrap();
    let topics = TopicReconciler::new(&registry, &store);

    let report = topics.provision(&project(), &desired).await.unwrap();

    assert_eq!(report.topics.len(), 5);
    assert!(report.topics.iter().all(|t| t.action == Action::Created));
    assert!(report.warnings.is_empty());
    assert_eq!(
        registry.topic_paths(),
        vec![
            "/orgs/acme/field-trial/device/scs-bgx-401/control".to_owned(),
            "/orgs/acme/field-trial/device/scs-bgx-401/status".to_owned(),
            "/orgs/acme/field-trial/loc/2/climate".to_owned(),
            "/orgs/acme/field-trial/loc/2/gases".to_owned(),
            "/orgs/acme/field-trial/loc/2/particulates".to_owned(),
        ]
    );

    let gases = registry.topic("/orgs/acme/field-trial/loc/2/gases").unwrap();
    assert!(gases.is_public);
    assert_eq!(gases.schema_id.as_deref(), Some("sensorbox-gases-co-no2"));
    assert_eq!(store.load::<Project>().unwrap(), Some(project()));
}

#[tokio::test]
async fn second_pass_creates_nothing() {
    let (_dir, store) = populated_store();
    let registry = FakeRegistry::new();
    let desired = DesiredState::load(&store).unwrap();
    let topics = TopicReconciler::new(&registry, &store);

    topics.provision(&project(), &desired).await.unwrap();
    let creates = registry.creates();
    let report = topics.provision(&project(), &desired).await.unwrap();

    assert_eq!(registry.creates(), creates);
    assert!(report.topics.iter().all(|t| t.action == Action::Updated));
}

#[tokio::test]
async fn schema_mismatch_warns_and_keeps_remote_schema() {
    let (_dir, store) = populated_store();
    let registry = FakeRegistry::new().with_topic(gases_topic("A"));
    let desired = DesiredState::load(&store).unwrap();
    let topics = TopicReconciler::new(&registry, &store);

    let mismatch = topics
        .check_gases_schema(&project(), &desired)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mismatch.remote_schema_id.as_deref(), Some("A"));
    assert_eq!(mismatch.local_schema_id, "sensorbox-gases-co-no2");

    let report = topics.provision(&project(), &desired).await.unwrap();
    assert_eq!(report.warnings.len(), 1);

    let gases = registry.topic("/orgs/acme/field-trial/loc/2/gases").unwrap();
    assert_eq!(gases.schema_id.as_deref(), Some("A"));
    assert_eq!(gases.name, "Gases");
    assert!(!gases.is_public);
}

#[tokio::test]
async fn matching_schema_is_not_reported() {
    let (_dir, store) = populated_store();
    let registry = FakeRegistry::new().with_topic(gases_topic("sensorbox-gases-co-no2"));
    let desired = DesiredState::load(&store).unwrap();
    let topics = TopicReconciler::new(&registry, &store);

    assert!(
        topics
            .check_gases_schema(&project(), &desired)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn no_particulates_topic_without_monitor() {
    let (_dir, store) = populated_store();
    store.save(&opc_conf("none")).unwrap();
    let registry = FakeRegistry::new();
    let desired = DesiredState::load(&store).unwrap();
    let topics = TopicReconciler::new(&registry, &store);

    let report = topics.provision(&project(), &desired).await.unwrap();
    assert_eq!(report.topics.len(), 4);
    assert!(report.topics.iter().all(|t| t.role != TopicRole::Particulates));

    let found = topics.found_topics(&project(), &desired).await.unwrap();
    assert_eq!(found.len(), 4);
}

#[tokio::test]
async fn changed_calibration_yields_new_gases_schema() {
    let (_dir, store) = populated_store();
    let registry = FakeRegistry::new();
    let topics = TopicReconciler::new(&registry, &store);

    let before = DesiredState::load(&store).unwrap();
    topics.provision(&project(), &before).await.unwrap();

    store.save(&afe_calib(&["NO2", "CO", "SO2"])).unwrap();
    let after = DesiredState::load(&store).unwrap();
    let report = topics.provision(&project(), &after).await.unwrap();

    assert_eq!(report.warnings.len(), 1);
    let gases = registry.topic("/orgs/acme/field-trial/loc/2/gases").unwrap();
    assert_eq!(gases.schema_id.as_deref(), Some("sensorbox-gases-co-no2"));
}

#[tokio::test]
async fn full_sequence_is_idempotent() {
    let (_dir, store) = populated_store();
    let registry = FakeRegistry::new().with_user("tech-1");

    let org_fields = OrganisationUpdate {
        name: Some("Acme".into()),
        website: Some("https://acme.test".into()),
        description: Some("Air quality".into()),
        email: Some("ops@acme.test".into()),
    };
    let device_fields = DeviceUpdate {
        user_id: None,
        location: Some(Location {
            lat: 50.8,
            lng: -0.12,
            postcode: "BN2 0DF".into(),
        }),
        description: None,
    };

    for pass in 0..2 {
        OrganisationReconciler::new(&registry, ORG)
            .ensure(&org_fields)
            .await
            .unwrap();

        let desired = DesiredState::load(&store).unwrap();
        let devices = DeviceReconciler::new(&registry, &store, ORG, BOX_LABEL);
        let existing = devices.find_existing().await.unwrap();
        let fields = DeviceUpdate {
            user_id: existing.is_none().then(|| "tech-1".to_owned()),
            ..device_fields.clone()
        };
        devices
            .register_or_update(existing, &DesiredDevice::new(&desired, fields))
            .await
            .unwrap();

        TopicReconciler::new(&registry, &store)
            .provision(&project(), &desired)
            .await
            .unwrap();

        if pass == 0 {
            assert_eq!(registry.creates(), 1 + 1 + 5);
        }
    }

    assert_eq!(registry.creates(), 7);
    assert_eq!(registry.device_count(), 1);
}
