//! Psu-conf command handler.

use tracing::info;

use sensorbox_core::{ConfStore, DocumentKind, PsuConf};

use crate::cli::{GlobalOpts, PsuConfArgs};
use crate::error::CliError;
use crate::output;

pub fn handle(store: &ConfStore, args: PsuConfArgs, global: &GlobalOpts) -> Result<(), CliError> {
    if args.delete {
        let deleted = store.delete(DocumentKind::PsuConf)?;
        info!(deleted, "PSUConf delete");
        return Ok(());
    }

    let Some(model) = args.model else {
        let Some(conf) = store.load::<PsuConf>()? else {
            info!("no PSUConf document");
            return Ok(());
        };
        return output::emit(global.output, &conf, global.quiet);
    };

    let model = model.trim();
    if model.is_empty() {
        return Err(CliError::Validation {
            field: "model".into(),
            reason: "must not be empty".into(),
        });
    }

    let conf = PsuConf {
        model: model.to_owned(),
    };
    store.save(&conf)?;
    info!(model = %conf.model, "PSUConf saved");
    output::emit(global.output, &conf, global.quiet)
}
