// ── Local configuration documents ──
//
// Small JSON documents persisted by `ConfStore`, one file per kind.
// Keys are kebab-case on disk.

mod afe_calib;
mod client_auth;
mod opc_conf;
mod project;
mod psu_conf;
mod system_id;

use serde::Serialize;
use serde::de::DeserializeOwned;
use strum::{Display, EnumIter, EnumString};

pub use afe_calib::{AfeCalib, SensorCalib};
pub use client_auth::ClientAuth;
pub use opc_conf::OpcConf;
pub use project::Project;
pub use psu_conf::PsuConf;
pub use system_id::SystemId;

/// The kinds of document the store knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum DocumentKind {
    SystemId,
    AfeCalib,
    OpcConf,
    PsuConf,
    ClientAuth,
    Project,
}

impl DocumentKind {
    /// File name under the store root.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::SystemId => "system_id.json",
            Self::AfeCalib => "afe_calib.json",
            Self::OpcConf => "opc_conf.json",
            Self::PsuConf => "psu_conf.json",
            Self::ClientAuth => "client_auth.json",
            Self::Project => "project.json",
        }
    }
}

/// A document type that can be loaded from and saved to a `ConfStore`.
pub trait Document: Serialize + DeserializeOwned {
    const KIND: DocumentKind;
}

impl Document for SystemId {
    const KIND: DocumentKind = DocumentKind::SystemId;
}

impl Document for AfeCalib {
    const KIND: DocumentKind = DocumentKind::AfeCalib;
}

impl Document for OpcConf {
    const KIND: DocumentKind = DocumentKind::OpcConf;
}

impl Document for PsuConf {
    const KIND: DocumentKind = DocumentKind::PsuConf;
}

impl Document for ClientAuth {
    const KIND: DocumentKind = DocumentKind::ClientAuth;
}

impl Document for Project {
    const KIND: DocumentKind = DocumentKind::Project;
}
