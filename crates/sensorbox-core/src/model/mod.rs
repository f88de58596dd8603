// ── Registry domain model ──
//
// Canonical representations of the remote entities the reconcilers manage.
// Wire types from `sensorbox_api` are converted into these at the
// `Registry` boundary.

pub mod device;
pub mod organisation;
pub mod topic;
pub mod user;

pub use device::{Device, DeviceSpec, DeviceUpdate, IssuedDevice, Location};
pub use organisation::{Organisation, OrganisationUpdate};
pub use topic::{NewTopic, Topic, TopicInfo, TopicUpdate};
pub use user::User;
