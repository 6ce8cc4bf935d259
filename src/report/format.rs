use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use serde::Serialize;

use crate::error::NavTimingError;
use crate::host::NavigationType;

/// Largest integer an IEEE double (and thus a JSON consumer) holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A single report value: a plain number or formatted text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Field {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl Field {
    /// Integral values become [`Field::Integer`] so they serialize without a
    /// trailing `.0`.
    pub fn number(value: f64) -> Self {
        if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
            Field::Integer(value as i64)
        } else {
            Field::Number(value)
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Field::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<i64> for Field {
    fn from(value: i64) -> Self {
        Field::Integer(value)
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::Text(value.to_string())
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Field::Text(value)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Integer(value) => write!(f, "{}", value),
            Field::Number(value) => write!(f, "{}", value),
            Field::Text(text) => f.write_str(text),
        }
    }
}

/// Renders a duration in milliseconds.
///
/// `0` stays the number `0`. Magnitudes above one second become seconds with
/// two decimals (`1500` is `"1.50s"`), everything else is rounded to whole
/// milliseconds (`500` is `"500.00ms"`). The sign is carried through, so
/// `-1500` is `"-1.50s"`.
pub fn format_duration(value: f64) -> Field {
    if value == 0.0 {
        return Field::Integer(0);
    }

    if value.abs() > 1000.0 {
        // Round on whole centiseconds so 10215 gives 10.22 rather than the
        // binary-nearest 10.21.
        let centis = (value / 10.0).round();
        return Field::Text(format!("{:.2}s", centis / 100.0));
    }

    let rounded = value.round();
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    Field::Text(format!("{:.2}ms", rounded))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    PtBr,
    EnUs,
    EnGb,
}

impl Locale {
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::EnUs => "en-US",
            Locale::EnGb => "en-GB",
        }
    }

    fn date_pattern(&self) -> &'static str {
        match self {
            Locale::PtBr | Locale::EnGb => "%d/%m/%Y",
            Locale::EnUs => "%-m/%-d/%Y",
        }
    }

    fn time_pattern(&self) -> &'static str {
        match self {
            Locale::PtBr | Locale::EnGb => "%H:%M:%S",
            Locale::EnUs => "%-I:%M:%S %p",
        }
    }

    pub fn navigation_label(&self, navigation_type: NavigationType) -> &'static str {
        match (self, navigation_type) {
            (Locale::PtBr, NavigationType::UserInteraction) => "Interação do usuário",
            (Locale::PtBr, NavigationType::Reload) => "Recarregamento da página",
            (Locale::PtBr, NavigationType::HistoryNavigation) => {
                "Movimentação pelo histórico (voltar ou avançar)"
            }
            (Locale::PtBr, NavigationType::Unknown) => "Tipo desconhecido",
            (_, NavigationType::UserInteraction) => "User interaction",
            (_, NavigationType::Reload) => "Page reload",
            (_, NavigationType::HistoryNavigation) => "History navigation (back or forward)",
            (_, NavigationType::Unknown) => "Unknown type",
        }
    }

    /// Placeholder for values the host did not report.
    pub fn unknown(&self) -> &'static str {
        match self {
            Locale::PtBr => "Desconhecido",
            Locale::EnUs | Locale::EnGb => "Unknown",
        }
    }
}

impl FromStr for Locale {
    type Err = NavTimingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "pt-br" => Ok(Locale::PtBr),
            "en-us" => Ok(Locale::EnUs),
            "en-gb" => Ok(Locale::EnGb),
            _ => Err(NavTimingError::UnknownLocale(s.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Time zone used to render wall clock times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Zone {
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl Zone {
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, NavTimingError> {
        if !(-1439..=1439).contains(&minutes) {
            return Err(NavTimingError::InvalidOffset(minutes.to_string()));
        }
        FixedOffset::east_opt(minutes * 60)
            .map(Zone::Fixed)
            .ok_or_else(|| NavTimingError::InvalidOffset(minutes.to_string()))
    }
}

impl FromStr for Zone {
    type Err = NavTimingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("local") {
            return Ok(Zone::Local);
        }
        let minutes = s
            .parse::<i32>()
            .map_err(|_| NavTimingError::InvalidOffset(s.to_string()))?;
        Zone::from_offset_minutes(minutes)
    }
}

/// Locale and time zone aware formatting for report values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocaleFormatter {
    pub locale: Locale,
    pub zone: Zone,
}

impl LocaleFormatter {
    pub fn new(locale: Locale, zone: Zone) -> Self {
        Self { locale, zone }
    }

    /// Renders an epoch timestamp in milliseconds as `"<date> - <time>"`.
    /// Zero, negative and unrepresentable timestamps yield the number `0`.
    pub fn date(&self, timestamp: f64) -> Field {
        if !(timestamp > 0.0) {
            return Field::Integer(0);
        }

        let Some(utc) = DateTime::<Utc>::from_timestamp_millis(timestamp.round() as i64) else {
            log::debug!("Timestamp {} is out of range, rendering as 0", timestamp);
            return Field::Integer(0);
        };

        let text = match self.zone {
            Zone::Local => self.render(utc.with_timezone(&Local)),
            Zone::Fixed(offset) => self.render(utc.with_timezone(&offset)),
        };
        Field::Text(text)
    }

    fn render<Tz: TimeZone>(&self, at: DateTime<Tz>) -> String
    where
        Tz::Offset: fmt::Display,
    {
        format!(
            "{} - {}",
            at.format(self.locale.date_pattern()),
            at.format(self.locale.time_pattern())
        )
    }
}
