use serde::Deserialize;

use crate::error::NavTimingError;
use crate::report::{Locale, LocaleFormatter, OutputFormat, Zone};

/// Report settings, read from the YAML config file and then overridden by
/// the environment and the command line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Locale tag used for dates and labels, e.g. `pt-BR` or `en-US`.
    pub locale: String,

    /// Fixed UTC offset in minutes used to render wall clock times.
    /// The machine's local time zone is used when not set.
    pub utc_offset_minutes: Option<i32>,

    /// Output format, one of `text`, `json` or `yaml`.
    pub output: String,

    /// Emit raw millisecond values instead of formatted dates and durations.
    pub raw: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default().tag().to_string(),
            utc_offset_minutes: None,
            output: "text".to_string(),
            raw: false,
        }
    }
}

impl ReportConfig {
    pub fn formatter(&self) -> Result<LocaleFormatter, NavTimingError> {
        let locale = self.locale.parse::<Locale>()?;
        let zone = match self.utc_offset_minutes {
            Some(minutes) => Zone::from_offset_minutes(minutes)?,
            None => Zone::Local,
        };
        Ok(LocaleFormatter::new(locale, zone))
    }

    pub fn output_format(&self) -> Result<OutputFormat, NavTimingError> {
        self.output.parse()
    }
}

/// Parses an offset setting: whole minutes east of UTC, or `local`.
pub fn parse_utc_offset(value: &str) -> Result<Option<i32>, NavTimingError> {
    match value.parse::<Zone>()? {
        Zone::Local => Ok(None),
        Zone::Fixed(offset) => Ok(Some(offset.local_minus_utc() / 60)),
    }
}

pub(crate) fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
