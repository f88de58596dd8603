//! Output formatting: JSON and YAML.
//!
//! Renders a command's result in the format selected by `--output`. Every
//! command prints exactly one document on stdout; diagnostics go to stderr.

use std::io::{self, Write};

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Render a single serde-serializable item in the chosen format.
pub fn render_single<T>(format: OutputFormat, data: &T) -> Result<String, CliError>
where
    T: Serialize + ?Sized,
{
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::JsonCompact => Ok(serde_json::to_string(data)?),
        OutputFormat::Yaml => render_yaml(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Render and print in one step.
pub fn emit<T>(format: OutputFormat, data: &T, quiet: bool) -> Result<(), CliError>
where
    T: Serialize + ?Sized,
{
    let out = render_single(format, data)?;
    print_output(&out, quiet);
    Ok(())
}

// serde_yaml ends documents with a newline; `print_output` adds its own.
fn render_yaml<T: Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    let mut out = serde_yaml::to_string(data)?;
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}
