use std::fmt::Write;
use std::str::FromStr;

use unicode_truncate::UnicodeTruncateStr;

use super::format::Field;
use super::model::{Interval, Report};
use crate::error::NavTimingError;

const LABEL_WIDTH: usize = 16;
const DURATION_WIDTH: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn render(&self, report: &Report) -> Result<String, NavTimingError> {
        match self {
            OutputFormat::Text => Ok(render_text(report)),
            OutputFormat::Json => {
                let mut out = serde_json::to_string_pretty(report)?;
                out.push('\n');
                Ok(out)
            }
            OutputFormat::Yaml => serde_yaml::to_string(report).map_err(NavTimingError::Render),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = NavTimingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => Err(NavTimingError::UnknownOutput(s.to_string())),
        }
    }
}

fn to_fixed_width(input: &str, width: usize) -> String {
    let (truncated, _) = input.unicode_truncate(width);
    format!("{:<width$}", truncated, width = width)
}

fn or_dash(value: Option<&Field>) -> String {
    value.map(Field::to_string).unwrap_or_else(|| "-".to_string())
}

fn push_span(out: &mut String, label: &str, start: &Field, end: &Field, duration: &Field) {
    let _ = writeln!(
        out,
        "  {} {:>width$}  {} → {}",
        to_fixed_width(label, LABEL_WIDTH),
        duration.to_string(),
        start,
        end,
        width = DURATION_WIDTH
    );
}

fn push_interval(out: &mut String, label: &str, interval: &Interval) {
    push_span(out, label, &interval.start, &interval.end, &interval.duration);
}

fn push_value(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "  {} {}", to_fixed_width(label, LABEL_WIDTH), value);
}

/// Human readable, sectioned rendering of a report.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}  total={}  redirects={}",
        report.navigation_type, report.total.interval.duration, report.redirect.count
    );

    out.push('\n');
    out.push_str("TIMINGS\n");
    push_interval(&mut out, "redirect", &report.redirect.interval);
    push_interval(&mut out, "app cache", &report.app_cache);
    push_interval(&mut out, "dns", &report.dns);
    let tcp = &report.tcp;
    push_span(&mut out, "tcp", &tcp.start, &tcp.end, &tcp.duration);
    push_value(&mut out, "  ssl start", &report.tcp.start_ssl.to_string());
    push_interval(&mut out, "request", &report.request);
    push_interval(&mut out, "response", &report.response);
    push_interval(&mut out, "processing", &report.processing);
    push_interval(&mut out, "onload", &report.on_load);
    push_interval(&mut out, "browser", &report.browser);
    push_interval(&mut out, "total", &report.total.interval);
    push_value(
        &mut out,
        "network latency",
        &report.total.network_latency.to_string(),
    );

    if !report.paint.is_empty() {
        out.push('\n');
        out.push_str("PAINT\n");
        for (name, paint) in &report.paint {
            push_value(&mut out, name, &paint.when.to_string());
        }
    }

    let connection = &report.connection;
    out.push('\n');
    out.push_str("CONNECTION\n");
    push_value(&mut out, "downlink", &or_dash(connection.downlink.as_ref()));
    push_value(&mut out, "effective type", &or_dash(connection.effective_type.as_ref()));
    push_value(&mut out, "round trip", &or_dash(connection.roundtrip_time.as_ref()));
    push_value(&mut out, "type", &or_dash(connection.connection_type.as_ref()));

    out.push('\n');
    out.push_str("SERVICE WORKER\n");
    push_value(
        &mut out,
        "activated",
        if report.service_worker.activated { "yes" } else { "no" },
    );
    push_value(
        &mut out,
        "script",
        report.service_worker.script_url.as_deref().unwrap_or("-"),
    );

    let navigator = &report.navigator;
    let cookie_enabled = navigator.cookie_enabled.map(|enabled| enabled.to_string());
    let fields = [
        ("user agent", navigator.user_agent.as_deref()),
        ("app code name", navigator.app_code_name.as_deref()),
        ("app name", navigator.app_name.as_deref()),
        ("app version", navigator.app_version.as_deref()),
        ("language", navigator.language.as_deref()),
        ("platform", navigator.platform.as_deref()),
        ("product", navigator.product.as_deref()),
        ("product sub", navigator.product_sub.as_deref()),
        ("vendor", navigator.vendor.as_deref()),
        ("cookies", cookie_enabled.as_deref()),
    ];
    if fields.iter().any(|(_, value)| value.is_some()) {
        out.push('\n');
        out.push_str("NAVIGATOR\n");
        for (label, value) in fields {
            if let Some(value) = value {
                push_value(&mut out, label, value);
            }
        }
    }

    out
}
