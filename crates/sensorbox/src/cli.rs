//! Clap derive structures for the `sensorbox` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Only depends on clap so `build.rs` can include it for man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// sensorbox -- commission air-quality appliances against the registry
#[derive(Debug, Parser)]
#[command(
    name = "sensorbox",
    version,
    about = "Commission sensorbox appliances against the registry",
    long_about = "Registers an appliance with the cloud registry and builds its topic\n\
        hierarchy from the local hardware and calibration documents.\n\n\
        Every set command is idempotent: running it again converges the\n\
        registry instead of creating duplicates. Without set flags a\n\
        command only queries.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Registry profile to use
    #[arg(long, env = "SENSORBOX_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Registry URL (overrides profile)
    #[arg(long, env = "SENSORBOX_REGISTRY", global = true)]
    pub registry: Option<String>,

    /// Registry API key
    #[arg(long, env = "SENSORBOX_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Organisation id (overrides profile)
    #[arg(long, env = "SENSORBOX_ORG_ID", global = true)]
    pub org_id: Option<String>,

    /// Directory holding the local documents (overrides profile)
    #[arg(long, env = "SENSORBOX_CONF_DIR", global = true)]
    pub conf_dir: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        env = "SENSORBOX_OUTPUT",
        default_value = "json-compact",
        global = true
    )]
    pub output: OutputFormat,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "SENSORBOX_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON (default)
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Query or set the organisation the appliance belongs to
    #[command(alias = "org")]
    Organisation(OrganisationArgs),

    /// Register the appliance as a registry device, or query it
    ClientAuth(ClientAuthArgs),

    /// Build the appliance's topic hierarchy, or show the stored project
    Project(ProjectArgs),

    /// Show or set the appliance identity document
    SystemId(SystemIdArgs),

    /// Show, set or delete the particulate monitor configuration
    OpcConf(OpcConfArgs),

    /// Show, set or delete the power supply board configuration
    PsuConf(PsuConfArgs),

    /// Show or import the AFE calibration document
    AfeCalib(AfeCalibArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REGISTRY COMMANDS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct OrganisationArgs {
    /// Organisation id (defaults to --org-id or the profile)
    #[arg(short = 'o', long = "org")]
    pub org: Option<String>,

    /// Display name
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Website URL
    #[arg(short = 'w', long)]
    pub website: Option<String>,

    /// Free-text description
    #[arg(short = 'd', long)]
    pub description: Option<String>,

    /// Contact email
    #[arg(short = 'e', long)]
    pub email: Option<String>,
}

#[derive(Debug, Args)]
pub struct ClientAuthArgs {
    /// Registry user who will own the device (fixed once registered)
    #[arg(short = 'u', long)]
    pub user_id: Option<String>,

    /// Installation site
    #[arg(
        short = 'l',
        long,
        num_args = 3,
        value_names = ["LAT", "LNG", "POSTCODE"],
        allow_negative_numbers = true
    )]
    pub location: Option<Vec<String>>,

    /// Device description (defaults to the model name and configuration)
    #[arg(short = 'd', long)]
    pub description: Option<String>,
}

#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// Place the appliance in a group and location, then build its topics
    #[arg(short = 's', long = "set", num_args = 2, value_names = ["GROUP", "LOCATION_ID"])]
    pub set: Option<Vec<String>>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LOCAL DOCUMENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SystemIdArgs {
    /// Vendor id, e.g. SCS
    #[arg(short = 'd', long)]
    pub vendor_id: Option<String>,

    /// Model id, e.g. BGX
    #[arg(short = 'm', long)]
    pub model_id: Option<String>,

    /// Model name, e.g. Praxis
    #[arg(short = 'n', long)]
    pub model_name: Option<String>,

    /// Configuration, e.g. BGX-INDOOR
    #[arg(short = 'c', long)]
    pub configuration: Option<String>,

    /// Serial number
    #[arg(short = 's', long)]
    pub serial: Option<u32>,
}

#[derive(Debug, Args)]
pub struct OpcConfArgs {
    /// Monitor model, e.g. N2 (`none` when not fitted)
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Sampling period in seconds
    #[arg(short = 's', long)]
    pub sample_period: Option<u32>,

    /// Power-saving mode (0 or 1)
    #[arg(short = 'p', long, value_parser = clap::builder::BoolishValueParser::new())]
    pub power_saving: Option<bool>,

    /// Delete the document
    #[arg(long, conflicts_with_all = ["model", "sample_period", "power_saving"])]
    pub delete: bool,
}

#[derive(Debug, Args)]
pub struct PsuConfArgs {
    /// Board model, e.g. OsloV1 or PrototypeV1
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Delete the document (no board fitted)
    #[arg(short = 'd', long, conflicts_with = "model")]
    pub delete: bool,
}

#[derive(Debug, Args)]
pub struct AfeCalibArgs {
    /// Import a calibration JSON file into the store
    #[arg(long, value_name = "PATH")]
    pub from_file: Option<PathBuf>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key (registry, org_id, api_key, api_key_env, conf_dir, ca_cert, timeout)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store the active profile's API key in the system keyring
    SetKey,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
