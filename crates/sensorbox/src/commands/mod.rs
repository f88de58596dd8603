//! Command dispatch: bridges CLI args -> core reconcilers -> output formatting.

pub mod afe_calib;
pub mod client_auth;
pub mod config_cmd;
pub mod opc_conf;
pub mod organisation;
pub mod project;
pub mod psu_conf;
pub mod system_id;
pub mod util;

use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::config;
use crate::error::CliError;

/// Dispatch a parsed command to its handler.
///
/// Config, completions and local-document commands run without a registry
/// connection; the rest resolve a profile and connect first.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Config(args) => config_cmd::handle(args, global),
        Command::Completions(args) => {
            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "sensorbox", &mut std::io::stdout());
            Ok(())
        }

        // ── Local documents ─────────────────────────────────────────
        Command::SystemId(args) => system_id::handle(&config::open_store(global), args, global),
        Command::OpcConf(args) => opc_conf::handle(&config::open_store(global), args, global),
        Command::PsuConf(args) => psu_conf::handle(&config::open_store(global), args, global),
        Command::AfeCalib(args) => afe_calib::handle(&config::open_store(global), args, global),

        // ── Registry ────────────────────────────────────────────────
        Command::Organisation(args) => {
            let (registry_config, client) = util::connect(global)?;
            organisation::handle(&client, &registry_config, args, global).await
        }
        Command::ClientAuth(args) => {
            let store = config::open_store(global);
            let (registry_config, client) = util::connect(global)?;
            client_auth::handle(&client, &registry_config, &store, args, global).await
        }
        Command::Project(args) => {
            let store = config::open_store(global);
            let (registry_config, client) = util::connect(global)?;
            project::handle(&client, &registry_config, &store, args, global).await
        }
    }
}
