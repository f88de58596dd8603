//! Client-auth command handler: device registration and query.

use tracing::info;

use sensorbox_core::{
    ConfStore, DesiredDevice, DesiredState, DeviceReconciler, DeviceUpdate, Registry,
    RegistryConfig,
};

use crate::cli::{ClientAuthArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle<R: Registry>(
    registry: &R,
    registry_config: &RegistryConfig,
    store: &ConfStore,
    args: ClientAuthArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let update = DeviceUpdate {
        user_id: args.user_id,
        location: util::parse_location(args.location)?,
        description: args.description,
    };

    let org_id = registry_config.require_org_id()?;
    let desired_state = DesiredState::load(store)?;
    let reconciler = DeviceReconciler::new(registry, store, org_id, &desired_state.box_label);
    let existing = reconciler.find_existing().await?;

    // ── Query ───────────────────────────────────────────────────────
    if update.is_empty() {
        let Some((device, client_auth)) = reconciler.status(existing)? else {
            info!(box_label = %desired_state.box_label, "no device is registered");
            return Ok(());
        };
        match &client_auth {
            Some(auth) => info!(client_auth = ?auth, "local credentials"),
            None => info!("no local credentials"),
        }
        return output::emit(global.output, &device, global.quiet);
    }

    // ── Register or update ──────────────────────────────────────────
    let desired = DesiredDevice::new(&desired_state, update);
    let (outcome, client_auth) = reconciler.register_or_update(existing, &desired).await?;
    info!(
        client_id = %client_auth.client_id,
        action = %outcome.action(),
        "device reconciled"
    );
    info!(client_auth = ?client_auth, "local credentials");

    output::emit(global.output, outcome.entity(), global.quiet)
}
