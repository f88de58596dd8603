//! Afe-calib command handler.

use tracing::info;

use sensorbox_core::{AfeCalib, ConfStore};

use crate::cli::{AfeCalibArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

pub fn handle(store: &ConfStore, args: AfeCalibArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let calib = if let Some(path) = args.from_file {
        let calib: AfeCalib = util::read_json_file(&path)?;
        store.save(&calib)?;
        info!(
            serial_number = %calib.serial_number,
            gases = ?calib.gas_names(),
            "AFECalib imported"
        );
        calib
    } else {
        let Some(calib) = store.load::<AfeCalib>()? else {
            info!("no AFECalib document");
            return Ok(());
        };
        calib
    };

    output::emit(global.output, &calib, global.quiet)
}
