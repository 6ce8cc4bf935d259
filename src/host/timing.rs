use serde::Deserialize;

/// Absolute navigation timestamps, in milliseconds since the unix epoch.
/// A field the host did not report reads as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimingFacts {
    pub navigation_start: i64,
    pub redirect_start: i64,
    pub redirect_end: i64,
    pub fetch_start: i64,
    pub domain_lookup_start: i64,
    pub domain_lookup_end: i64,
    pub connect_start: i64,
    pub connect_end: i64,
    pub secure_connection_start: i64,
    pub request_start: i64,
    pub response_start: i64,
    pub response_end: i64,
    pub dom_loading: i64,
    pub load_event_start: i64,
    pub load_event_end: i64,
}

/// A single record from the host's entry enumeration, e.g. a paint milestone.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceEntry {
    pub name: String,

    /// Offset relative to `navigationStart`, fractional milliseconds.
    #[serde(default)]
    pub start_time: f64,
}

impl PerformanceEntry {
    pub fn new(name: impl Into<String>, start_time: f64) -> Self {
        Self {
            name: name.into(),
            start_time,
        }
    }
}

/// Named timing intervals derived from [`TimingFacts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AppCache,
    Dns,
    Tcp,
    Request,
    Response,
    Processing,
    Browser,
    OnLoad,
    Redirect,
    NetworkLatency,
    Total,
}

impl Phase {
    pub const ALL: [Phase; 11] = [
        Phase::AppCache,
        Phase::Dns,
        Phase::Tcp,
        Phase::Request,
        Phase::Response,
        Phase::Processing,
        Phase::Browser,
        Phase::OnLoad,
        Phase::Redirect,
        Phase::NetworkLatency,
        Phase::Total,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Phase::AppCache => "appCache",
            Phase::Dns => "dns",
            Phase::Tcp => "tcp",
            Phase::Request => "request",
            Phase::Response => "response",
            Phase::Processing => "processing",
            Phase::Browser => "browser",
            Phase::OnLoad => "onLoad",
            Phase::Redirect => "redirect",
            Phase::NetworkLatency => "networkLatency",
            Phase::Total => "total",
        }
    }

    /// The `(start, end)` timestamps bounding this phase.
    pub fn bounds(&self, timing: &TimingFacts) -> (i64, i64) {
        match self {
            Phase::AppCache => (timing.fetch_start, timing.domain_lookup_start),
            Phase::Dns => (timing.domain_lookup_start, timing.domain_lookup_end),
            Phase::Tcp => (timing.connect_start, timing.connect_end),
            Phase::Request => (timing.request_start, timing.response_start),
            Phase::Response => (timing.response_start, timing.response_end),
            Phase::Processing => (timing.dom_loading, timing.load_event_start),
            Phase::Browser => (timing.response_end, timing.load_event_end),
            Phase::OnLoad => (timing.load_event_start, timing.load_event_end),
            Phase::Redirect => (timing.redirect_start, timing.redirect_end),
            Phase::NetworkLatency => (timing.fetch_start, timing.response_end),
            Phase::Total => (timing.navigation_start, timing.load_event_end),
        }
    }

    /// `end - start`; may be zero or negative when the host data is inconsistent.
    /// Saturates at the `i64` limits for timestamps too far apart to subtract.
    pub fn duration(&self, timing: &TimingFacts) -> i64 {
        let (start, end) = self.bounds(timing);
        end.saturating_sub(start)
    }
}
