//! `jobhound config` subcommands.

use std::path::Path;
use std::process::ExitCode;

use jobhound_config::{ConfigLoader, ConfigValidator, ValidationResult};

use crate::adapters::default_config_path;
use crate::cli::ConfigAction;

pub(crate) fn handle_config_command(
    action: ConfigAction,
    explicit: Option<&Path>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Check => {
            let (path, config) = match explicit {
                Some(p) => (p.to_path_buf(), ConfigLoader::load(p)?),
                None => {
                    let p = default_config_path();
                    let config = ConfigLoader::load_or_default(&p)?;
                    (p, config)
                }
            };
            if !path.exists() {
                println!("No config file at {}, using defaults.", path.display());
            }

            let result = ConfigValidator::validate(&config);
            print!("{}", render_report(&path, &result));
            Ok(if result.is_valid() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn render_report(path: &Path, result: &ValidationResult) -> String {
    let mut out = String::new();
    for e in &result.errors {
        out.push_str(&format!("error: {}: {}\n", e.path, e.message));
    }
    for w in &result.warnings {
        out.push_str(&format!("warning: {}: {}\n", w.path, w.message));
    }
    if result.is_valid() {
        out.push_str(&format!(
            "{} is valid ({} warning(s)).\n",
            path.display(),
            result.warnings.len()
        ));
    } else {
        out.push_str(&format!(
            "{} has {} error(s).\n",
            path.display(),
            result.errors.len()
        ));
    }
    out
}
