//! Organisation command handler.

use tracing::info;

use sensorbox_core::{OrganisationReconciler, OrganisationUpdate, Registry, RegistryConfig};

use crate::cli::{GlobalOpts, OrganisationArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle<R: Registry>(
    registry: &R,
    registry_config: &RegistryConfig,
    args: OrganisationArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let org_id = match args.org.as_deref() {
        Some(org_id) => org_id,
        None => registry_config.require_org_id()?,
    };

    let fields = OrganisationUpdate {
        name: args.name,
        website: args.website,
        description: args.description,
        email: args.email,
    };

    let outcome = OrganisationReconciler::new(registry, org_id)
        .ensure(&fields)
        .await?;
    info!(org_id, action = %outcome.action(), "organisation reconciled");

    output::emit(global.output, outcome.entity(), global.quiet)
}
