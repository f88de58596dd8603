// sensorbox-core: Desired-state derivation and registry reconciliation.

pub mod config;
pub mod convert;
pub mod derive;
pub mod document;
pub mod error;
pub mod model;
pub mod reconcile;
pub mod registry;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::RegistryConfig;
pub use derive::{DesiredState, TopicRole, TopicSchema};
pub use document::{
    AfeCalib, ClientAuth, Document, DocumentKind, OpcConf, Project, PsuConf, SystemId,
};
pub use error::CoreError;
pub use model::{
    Device, DeviceUpdate, Location, Organisation, OrganisationUpdate, Topic, User,
};
pub use reconcile::{
    Action, DesiredDevice, DeviceReconciler, Outcome, OrganisationReconciler, ProvisionReport,
    Reconcile, SchemaMismatch, TopicReconciler,
};
pub use registry::Registry;
pub use store::{ConfStore, StoreError};
