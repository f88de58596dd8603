//! System-id command handler.

use tracing::info;

use sensorbox_core::{ConfStore, DocumentKind, SystemId};

use crate::cli::{GlobalOpts, SystemIdArgs};
use crate::error::CliError;
use crate::output;

pub fn handle(store: &ConfStore, args: SystemIdArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let current: Option<SystemId> = store.load()?;

    let is_set = args.vendor_id.is_some()
        || args.model_id.is_some()
        || args.model_name.is_some()
        || args.configuration.is_some()
        || args.serial.is_some();

    if !is_set {
        let Some(system_id) = current else {
            info!(path = %store.path_of(DocumentKind::SystemId).display(), "no SystemID document");
            return Ok(());
        };
        return output::emit(global.output, &system_id, global.quiet);
    }

    let system_id = match current {
        Some(current) => SystemId {
            vendor_id: args.vendor_id.unwrap_or(current.vendor_id),
            model_id: args.model_id.unwrap_or(current.model_id),
            model_name: args.model_name.unwrap_or(current.model_name),
            configuration: args.configuration.unwrap_or(current.configuration),
            system_serial_number: args.serial.unwrap_or(current.system_serial_number),
        },
        None => {
            let (Some(vendor_id), Some(model_id), Some(model_name), Some(configuration), Some(serial)) = (
                args.vendor_id,
                args.model_id,
                args.model_name,
                args.configuration,
                args.serial,
            ) else {
                return Err(CliError::Incomplete {
                    message: "no SystemID document exists; -d, -m, -n, -c and -s must all be set"
                        .into(),
                });
            };
            SystemId {
                vendor_id,
                model_id,
                model_name,
                configuration,
                system_serial_number: serial,
            }
        }
    };

    store.save(&system_id)?;
    info!(box_label = %system_id.box_label(), "SystemID saved");
    output::emit(global.output, &system_id, global.quiet)
}
