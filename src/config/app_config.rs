use std::env;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::report_config::{ReportConfig, parse_flag, parse_utc_offset};
use crate::error::NavTimingError;

pub const CONFIG_FILE_ENV: &str = "CONFIG_FILE";
pub const LOCALE_ENV: &str = "NAVTIMING_LOCALE";
pub const UTC_OFFSET_ENV: &str = "NAVTIMING_UTC_OFFSET";
pub const OUTPUT_ENV: &str = "NAVTIMING_OUTPUT";
pub const RAW_ENV: &str = "NAVTIMING_RAW";

const DEFAULT_CONFIG_FILE: &str = "navtiming.yml";

pub struct AppConfig {
    pub report: ReportConfig,

    /// The config file the settings were read from, if any.
    pub source: Option<PathBuf>,
}

/// Load the application configuration from a YAML file and environment variables.
/// The file is taken from the `CONFIG_FILE` environment variable, falling back to
/// `navtiming.yml` in the working directory. A missing default file leaves the
/// built-in defaults in place; a missing file named through `CONFIG_FILE` is an error.
/// `NAVTIMING_LOCALE`, `NAVTIMING_UTC_OFFSET`, `NAVTIMING_OUTPUT` and `NAVTIMING_RAW`
/// override the file.
pub fn load_config() -> Result<AppConfig, NavTimingError> {
    load_config_with(|key| env::var(key).ok())
}

/// Same as [`load_config`], reading variables through `lookup`.
pub fn load_config_with<F>(lookup: F) -> Result<AppConfig, NavTimingError>
where
    F: Fn(&str) -> Option<String>,
{
    let (path, explicit) = match lookup(CONFIG_FILE_ENV) {
        Some(path) => (PathBuf::from(path), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    let (mut report, source) = match std::fs::read_to_string(&path) {
        Ok(contents) => {
            let report: ReportConfig =
                serde_yaml::from_str(&contents).map_err(|source| NavTimingError::Yaml {
                    path: path.clone(),
                    source,
                })?;
            log::info!("Using config file {}", path.display());
            (report, Some(path))
        }
        Err(e) if e.kind() == ErrorKind::NotFound && !explicit => {
            log::info!("No config file at {}, using defaults", path.display());
            (ReportConfig::default(), None)
        }
        Err(source) => return Err(NavTimingError::Io { path, source }),
    };

    apply_env_overrides(&mut report, &lookup)?;

    Ok(AppConfig { report, source })
}

fn apply_env_overrides<F>(report: &mut ReportConfig, lookup: &F) -> Result<(), NavTimingError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(locale) = lookup(LOCALE_ENV) {
        log::debug!("{} overrides locale with {}", LOCALE_ENV, locale);
        report.locale = locale;
    }

    if let Some(offset) = lookup(UTC_OFFSET_ENV) {
        report.utc_offset_minutes = parse_utc_offset(&offset)?;
    }

    if let Some(output) = lookup(OUTPUT_ENV) {
        report.output = output;
    }

    if let Some(raw) = lookup(RAW_ENV) {
        report.raw = parse_flag(&raw);
    }

    Ok(())
}
