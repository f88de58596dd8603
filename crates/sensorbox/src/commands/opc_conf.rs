//! Opc-conf command handler.

use tracing::info;

use sensorbox_core::{ConfStore, DocumentKind, OpcConf};

use crate::cli::{GlobalOpts, OpcConfArgs};
use crate::error::CliError;
use crate::output;

pub fn handle(store: &ConfStore, args: OpcConfArgs, global: &GlobalOpts) -> Result<(), CliError> {
    if args.delete {
        let deleted = store.delete(DocumentKind::OpcConf)?;
        info!(deleted, "OPCConf delete");
        return Ok(());
    }

    let current: Option<OpcConf> = store.load()?;
    let is_set = args.model.is_some() || args.sample_period.is_some() || args.power_saving.is_some();

    if !is_set {
        let Some(conf) = current else {
            info!("no OPCConf document");
            return Ok(());
        };
        return output::emit(global.output, &conf, global.quiet);
    }

    let conf = match current {
        Some(current) => OpcConf {
            model: args.model.unwrap_or(current.model),
            sample_period: args.sample_period.unwrap_or(current.sample_period),
            power_saving: args.power_saving.unwrap_or(current.power_saving),
        },
        None => {
            let (Some(model), Some(sample_period)) = (args.model, args.sample_period) else {
                return Err(CliError::Incomplete {
                    message: "no OPCConf document exists; -m and -s must both be set".into(),
                });
            };
            OpcConf {
                model,
                sample_period,
                power_saving: args.power_saving.unwrap_or(false),
            }
        }
    };

    store.save(&conf)?;
    info!(model = %conf.model, monitor = conf.has_monitor(), "OPCConf saved");
    output::emit(global.output, &conf, global.quiet)
}
