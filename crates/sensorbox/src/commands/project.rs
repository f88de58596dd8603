//! Project command handler: topic hierarchy provisioning.

use tracing::info;

use sensorbox_core::{ConfStore, DesiredState, Project, Registry, RegistryConfig, TopicReconciler};

use crate::cli::{GlobalOpts, ProjectArgs};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle<R: Registry>(
    registry: &R,
    registry_config: &RegistryConfig,
    store: &ConfStore,
    args: ProjectArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let desired = DesiredState::load(store)?;
    let topics = TopicReconciler::new(registry, store);

    let project = match args.set.as_deref() {
        Some([group, location_id]) => {
            let org_id = registry_config.require_org_id()?;
            let project = Project::construct(org_id, group, location_id)?;

            let pb = util::spinner("Provisioning topics...", global.quiet);
            let report = topics.provision(&project, &desired).await;
            pb.finish_and_clear();
            let report = report?;

            output::emit(global.output, &report, global.quiet)?;
            report.project
        }
        Some(other) => {
            return Err(CliError::Validation {
                field: "set".into(),
                reason: format!("expected GROUP LOCATION_ID, got {} values", other.len()),
            });
        }
        None => {
            let Some(project) = store.load::<Project>()? else {
                info!("no project is set");
                return Ok(());
            };
            output::emit(global.output, &project, global.quiet)?;
            project
        }
    };

    if global.verbose > 0 {
        for (role, path) in topics.found_topics(&project, &desired).await? {
            info!(%role, path = %path, "topic found");
        }
    }

    Ok(())
}
