use std::collections::BTreeMap;

use super::format::{Field, LocaleFormatter, format_duration};
use super::model::{
    ConnectionInfo, Interval, PaintTime, RedirectInterval, Report, ServiceWorkerInfo, TcpInterval,
    TotalInterval,
};
use crate::host::{Host, NavigationMeta, Phase, TimingFacts};

const PAINT_ENTRY_TYPE: &str = "paint";
const ACTIVATED_STATE: &str = "activated";

/// How timestamps and durations are represented in a report.
pub trait ReportStyle {
    fn timestamp(&self, value: f64) -> Field;
    fn duration(&self, value: f64) -> Field;
}

/// Plain millisecond numbers.
pub struct RawStyle;

impl ReportStyle for RawStyle {
    fn timestamp(&self, value: f64) -> Field {
        Field::number(value)
    }

    fn duration(&self, value: f64) -> Field {
        Field::number(value)
    }
}

/// Localized dates and `ms`/`s` durations.
pub struct FormattedStyle {
    formatter: LocaleFormatter,
}

impl FormattedStyle {
    pub fn new(formatter: LocaleFormatter) -> Self {
        Self { formatter }
    }
}

impl ReportStyle for FormattedStyle {
    fn timestamp(&self, value: f64) -> Field {
        self.formatter.date(value)
    }

    fn duration(&self, value: f64) -> Field {
        format_duration(value)
    }
}

/// Builds performance reports from a host's timing data.
///
/// Timing facts and navigation metadata are copied when the builder is
/// created; paint entries, connection, service worker and navigator data are
/// read from the host each time a report is assembled.
pub struct PerformanceReportBuilder<'h, H: Host + ?Sized> {
    host: &'h H,
    timing: TimingFacts,
    navigation: NavigationMeta,
    formatter: LocaleFormatter,
}

impl<'h, H: Host + ?Sized> PerformanceReportBuilder<'h, H> {
    pub fn new(host: &'h H, formatter: LocaleFormatter) -> Self {
        let timing = host.timing();
        let navigation = host.navigation();
        log::debug!(
            "Snapshotted timing: navigationStart={}, loadEventEnd={}, locale={}",
            timing.navigation_start,
            timing.load_event_end,
            formatter.locale
        );

        Self {
            host,
            timing,
            navigation,
            formatter,
        }
    }

    pub fn timing(&self) -> &TimingFacts {
        &self.timing
    }

    pub fn phase_time(&self, phase: Phase) -> i64 {
        phase.duration(&self.timing)
    }

    pub fn app_cache_time(&self) -> i64 {
        self.phase_time(Phase::AppCache)
    }

    pub fn dns_time(&self) -> i64 {
        self.phase_time(Phase::Dns)
    }

    pub fn tcp_time(&self) -> i64 {
        self.phase_time(Phase::Tcp)
    }

    pub fn request_time(&self) -> i64 {
        self.phase_time(Phase::Request)
    }

    pub fn response_time(&self) -> i64 {
        self.phase_time(Phase::Response)
    }

    pub fn processing_time(&self) -> i64 {
        self.phase_time(Phase::Processing)
    }

    pub fn browser_time(&self) -> i64 {
        self.phase_time(Phase::Browser)
    }

    pub fn on_load_time(&self) -> i64 {
        self.phase_time(Phase::OnLoad)
    }

    pub fn redirect_time(&self) -> i64 {
        self.phase_time(Phase::Redirect)
    }

    pub fn network_latency(&self) -> i64 {
        self.phase_time(Phase::NetworkLatency)
    }

    pub fn total_time(&self) -> i64 {
        self.phase_time(Phase::Total)
    }

    pub fn navigation_type(&self) -> &'static str {
        self.formatter
            .locale
            .navigation_label(self.navigation.navigation_type())
    }

    pub fn redirect_count(&self) -> u32 {
        self.navigation.redirect_count
    }

    /// Connection details, with the locale's "unknown" placeholder for
    /// anything the host reported as missing, zero or empty.
    pub fn connection_info(&self, raw: bool) -> ConnectionInfo {
        if raw {
            self.connection_with(&RawStyle)
        } else {
            self.connection_with(&FormattedStyle::new(self.formatter))
        }
    }

    pub fn paint_times(&self, raw: bool) -> BTreeMap<String, PaintTime> {
        if raw {
            self.paint_with(&RawStyle)
        } else {
            self.paint_with(&FormattedStyle::new(self.formatter))
        }
    }

    pub fn service_worker_info(&self) -> ServiceWorkerInfo {
        match self.host.controller() {
            Some(controller) => ServiceWorkerInfo {
                activated: controller.state == ACTIVATED_STATE,
                script_url: controller.script_url,
            },
            None => ServiceWorkerInfo::default(),
        }
    }

    pub fn build_formatted_report(&self) -> Report {
        self.build_report(&FormattedStyle::new(self.formatter))
    }

    pub fn build_raw_report(&self) -> Report {
        self.build_report(&RawStyle)
    }

    pub fn build(&self, raw: bool) -> Report {
        if raw {
            self.build_raw_report()
        } else {
            self.build_formatted_report()
        }
    }

    /// Assembles the report with every value shaped by `style`.
    pub fn build_report(&self, style: &dyn ReportStyle) -> Report {
        let t = &self.timing;

        Report {
            app_cache: self.interval(Phase::AppCache, style),
            browser: self.interval(Phase::Browser, style),
            connection: self.connection_with(style),
            dns: self.interval(Phase::Dns, style),
            navigation_type: self.navigation_type().to_string(),
            navigator: self.host.navigator(),
            on_load: self.interval(Phase::OnLoad, style),
            paint: self.paint_with(style),
            processing: self.interval(Phase::Processing, style),
            redirect: RedirectInterval {
                interval: self.interval(Phase::Redirect, style),
                count: self.redirect_count(),
            },
            request: self.interval(Phase::Request, style),
            response: self.interval(Phase::Response, style),
            service_worker: self.service_worker_info(),
            tcp: TcpInterval {
                start: style.timestamp(t.connect_start as f64),
                start_ssl: style.timestamp(t.secure_connection_start as f64),
                end: style.timestamp(t.connect_end as f64),
                duration: style.duration(self.tcp_time() as f64),
            },
            total: TotalInterval {
                interval: self.interval(Phase::Total, style),
                network_latency: style.duration(self.network_latency() as f64),
            },
        }
    }

    fn interval(&self, phase: Phase, style: &dyn ReportStyle) -> Interval {
        let (start, end) = phase.bounds(&self.timing);
        let duration = phase.duration(&self.timing);
        if duration < 0 {
            log::debug!(
                "Phase {} ends before it starts ({} < {}), passing through",
                phase.name(),
                end,
                start
            );
        }

        Interval {
            start: style.timestamp(start as f64),
            end: style.timestamp(end as f64),
            duration: style.duration(duration as f64),
        }
    }

    fn connection_with(&self, style: &dyn ReportStyle) -> ConnectionInfo {
        let Some(connection) = self.host.connection() else {
            return ConnectionInfo::default();
        };
        let unknown = || Some(Field::from(self.formatter.locale.unknown()));

        ConnectionInfo {
            downlink: truthy_number(connection.downlink)
                .map(Field::number)
                .or_else(unknown),
            effective_type: truthy_text(connection.effective_type)
                .map(Field::from)
                .or_else(unknown),
            roundtrip_time: truthy_number(connection.rtt)
                .map(|rtt| style.duration(rtt))
                .or_else(unknown),
            connection_type: truthy_text(connection.connection_type)
                .map(Field::from)
                .or_else(unknown),
        }
    }

    fn paint_with(&self, style: &dyn ReportStyle) -> BTreeMap<String, PaintTime> {
        let entries = self.host.entries_by_type(PAINT_ENTRY_TYPE);
        log::debug!("Host reported {} paint entries", entries.len());

        entries
            .into_iter()
            .map(|entry| {
                let when = self.timing.navigation_start as f64 + entry.start_time;
                (
                    entry.name,
                    PaintTime {
                        when: style.timestamp(when),
                    },
                )
            })
            .collect()
    }
}

fn truthy_number(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

fn truthy_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use super::*;
    use crate::host::snapshot::ServiceWorkerState;
    use crate::host::snapshot::fixture::reference_page_load;
    use crate::host::{
        ConnectionDescriptor, ConnectionSource, EnvironmentMetadata, HostSnapshot,
        NavigationSource, PerformanceEntry, ServiceWorkerController, ServiceWorkerSource,
        TimingSource,
    };
    use crate::report::format::{Locale, Zone};

    fn brasilia() -> LocaleFormatter {
        LocaleFormatter::new(Locale::PtBr, Zone::from_offset_minutes(-180).expect("Invalid offset"))
    }

    fn text(value: &str) -> Field {
        Field::from(value)
    }

    #[test]
    fn test_interval_accessors() {
        let host = reference_page_load();
        let builder = PerformanceReportBuilder::new(&host, brasilia());

        assert_eq!(builder.app_cache_time(), 0);
        assert_eq!(builder.dns_time(), 0);
        assert_eq!(builder.tcp_time(), 0);
        assert_eq!(builder.request_time(), 7);
        assert_eq!(builder.response_time(), 1366);
        assert_eq!(builder.processing_time(), 8751);
        assert_eq!(builder.browser_time(), 8762);
        assert_eq!(builder.on_load_time(), 3);
        assert_eq!(builder.redirect_time(), 0);
        assert_eq!(builder.network_latency(), 1448);
        assert_eq!(builder.total_time(), 10215);
    }

    #[test]
    fn test_durations_match_bounds_in_both_modes() {
        let host = reference_page_load();
        let builder = PerformanceReportBuilder::new(&host, brasilia());

        for phase in Phase::ALL {
            let (start, end) = phase.bounds(builder.timing());
            assert_eq!(builder.phase_time(phase), end - start, "{}", phase.name());
            assert_eq!(
                RawStyle.duration(builder.phase_time(phase) as f64),
                Field::Integer(end - start)
            );
        }

        let formatted = builder.build_formatted_report();
        assert_eq!(formatted.request.duration, text("7.00ms"));
        assert_eq!(formatted.response.duration, text("1.37s"));
        assert_eq!(formatted.processing.duration, text("8.75s"));
        assert_eq!(formatted.browser.duration, text("8.76s"));
        assert_eq!(formatted.on_load.duration, text("3.00ms"));
        assert_eq!(formatted.app_cache.duration, Field::Integer(0));
    }

    #[test]
    fn test_total_time_raw_and_formatted() {
        let host = reference_page_load();
        let builder = PerformanceReportBuilder::new(&host, brasilia());

        let raw = builder.build_raw_report();
        assert_eq!(raw.total.interval.duration, Field::Integer(10215));
        assert_eq!(raw.total.network_latency, Field::Integer(1448));

        let formatted = builder.build_formatted_report();
        assert_eq!(formatted.total.interval.duration, text("10.22s"));
        assert_eq!(formatted.total.network_latency, text("1.45s"));
    }

    #[test]
    fn test_extreme_timestamps_pass_through() {
        let host = HostSnapshot {
            timing: TimingFacts {
                navigation_start: i64::MIN,
                load_event_end: 1526059520622,
                ..Default::default()
            },
            ..Default::default()
        };
        let builder = PerformanceReportBuilder::new(&host, brasilia());
        assert_eq!(builder.total_time(), i64::MAX);

        let raw = builder.build_raw_report();
        assert_eq!(raw.total.interval.duration, Field::Number(i64::MAX as f64));

        let formatted = builder.build_formatted_report();
        assert_eq!(formatted.total.interval.start, Field::Integer(0));
        assert_eq!(formatted.total.interval.end, text("11/05/2018 - 14:25:20"));
        let duration = formatted.total.interval.duration;
        assert!(duration.as_text().is_some_and(|d| d.ends_with('s')), "{}", duration);
    }

    #[test]
    fn test_raw_report_keeps_timestamps() {
        let host = reference_page_load();
        let raw = PerformanceReportBuilder::new(&host, brasilia()).build_raw_report();

        assert_eq!(raw.app_cache.start, Field::Integer(1526059510412));
        assert_eq!(raw.total.interval.start, Field::Integer(1526059510407));
        assert_eq!(raw.tcp.start_ssl, Field::Integer(0));
        assert_eq!(raw.redirect.count, 0);
    }

    #[test]
    fn test_formatted_report_dates() {
        let host = reference_page_load();
        let formatted = PerformanceReportBuilder::new(&host, brasilia()).build_formatted_report();

        assert_eq!(formatted.app_cache.start, text("11/05/2018 - 14:25:10"));
        assert_eq!(formatted.total.interval.end, text("11/05/2018 - 14:25:20"));
        assert_eq!(formatted.redirect.interval.start, Field::Integer(0));
        assert_eq!(formatted.tcp.start_ssl, Field::Integer(0));
    }

    #[test]
    fn test_navigation_type_labels() {
        let cases = [
            (Some(0), "User interaction"),
            (Some(1), "Page reload"),
            (Some(2), "History navigation (back or forward)"),
            (Some(99), "Unknown type"),
            (None, "Unknown type"),
        ];
        let formatter = LocaleFormatter::new(Locale::EnUs, Zone::Local);

        for (code, label) in cases {
            let host = HostSnapshot {
                navigation: NavigationMeta {
                    type_code: code,
                    redirect_count: 4,
                },
                ..Default::default()
            };
            let builder = PerformanceReportBuilder::new(&host, formatter);
            assert_eq!(builder.navigation_type(), label);
            assert_eq!(builder.redirect_count(), 4);
        }

        let host = reference_page_load();
        assert_eq!(
            PerformanceReportBuilder::new(&host, brasilia()).navigation_type(),
            "Movimentação pelo histórico (voltar ou avançar)"
        );
    }

    #[test]
    fn test_connection_zero_rtt_is_unknown() {
        let host = reference_page_load();
        let builder = PerformanceReportBuilder::new(&host, brasilia());

        let expected = ConnectionInfo {
            downlink: Some(Field::Integer(10)),
            effective_type: Some(text("4g")),
            roundtrip_time: Some(text("Desconhecido")),
            connection_type: Some(text("Desconhecido")),
        };
        assert_eq!(builder.connection_info(true), expected);
        assert_eq!(builder.connection_info(false), expected);
    }

    #[test]
    fn test_connection_rtt_modes() {
        let host = HostSnapshot {
            connection: Some(ConnectionDescriptor {
                downlink: Some(1.45),
                effective_type: Some("3g".to_string()),
                rtt: Some(1500.0),
                connection_type: Some(String::new()),
            }),
            ..Default::default()
        };
        let builder = PerformanceReportBuilder::new(&host, LocaleFormatter::new(Locale::EnUs, Zone::Local));

        let raw = builder.connection_info(true);
        assert_eq!(raw.downlink, Some(Field::Number(1.45)));
        assert_eq!(raw.roundtrip_time, Some(Field::Integer(1500)));
        assert_eq!(raw.connection_type, Some(text("Unknown")));

        let formatted = builder.connection_info(false);
        assert_eq!(formatted.roundtrip_time, Some(text("1.50s")));
        assert_eq!(formatted.effective_type, Some(text("3g")));
    }

    #[test]
    fn test_connection_absent() {
        let host = HostSnapshot::default();
        let builder = PerformanceReportBuilder::new(&host, brasilia());
        assert_eq!(builder.connection_info(true), ConnectionInfo::default());
        assert_eq!(builder.connection_info(false), ConnectionInfo::default());
    }

    #[test]
    fn test_paint_times() {
        let host = reference_page_load();
        let builder = PerformanceReportBuilder::new(&host, brasilia());

        let raw = builder.paint_times(true);
        assert_eq!(raw.len(), 2);
        assert_eq!(raw["first-paint"].when, Field::Integer(1526059510507));
        assert_eq!(raw["first-contentful-paint"].when, Field::Integer(1526059510517));

        let formatted = builder.paint_times(false);
        assert_eq!(formatted["first-paint"].when, text("11/05/2018 - 14:25:10"));
    }

    #[test]
    fn test_paint_times_edge_cases() {
        let mut entries = std::collections::HashMap::new();
        entries.insert(
            "paint".to_string(),
            vec![
                PerformanceEntry::new("first-paint", 10.25),
                PerformanceEntry::new("first-paint", 20.5),
            ],
        );
        let host = HostSnapshot {
            entries,
            ..Default::default()
        };
        let builder = PerformanceReportBuilder::new(&host, brasilia());

        let raw = builder.paint_times(true);
        assert_eq!(raw.len(), 1);
        assert_eq!(raw["first-paint"].when, Field::Number(20.5));

        let empty = HostSnapshot::default();
        assert!(PerformanceReportBuilder::new(&empty, brasilia()).paint_times(true).is_empty());
    }

    #[test]
    fn test_service_worker_info() {
        let host = reference_page_load();
        let builder = PerformanceReportBuilder::new(&host, brasilia());
        assert_eq!(
            builder.service_worker_info(),
            ServiceWorkerInfo {
                activated: true,
                script_url: Some("https://example.org".to_string()),
            }
        );

        let empty = HostSnapshot::default();
        assert_eq!(
            PerformanceReportBuilder::new(&empty, brasilia()).service_worker_info(),
            ServiceWorkerInfo {
                activated: false,
                script_url: None,
            }
        );
    }

    #[test]
    fn test_service_worker_not_yet_activated() {
        let host = HostSnapshot {
            service_worker: Some(ServiceWorkerState {
                controller: Some(ServiceWorkerController {
                    state: "activating".to_string(),
                    script_url: Some("/sw.js".to_string()),
                }),
            }),
            ..Default::default()
        };
        let info = PerformanceReportBuilder::new(&host, brasilia()).service_worker_info();
        assert!(!info.activated);
        assert_eq!(info.script_url.as_deref(), Some("/sw.js"));
    }

    /// Moves `loadEventEnd` forward by a second on every `timing()` call.
    struct DriftingHost {
        inner: HostSnapshot,
        reads: Cell<i64>,
    }

    impl TimingSource for DriftingHost {
        fn timing(&self) -> TimingFacts {
            self.reads.set(self.reads.get() + 1);
            let mut timing = self.inner.timing();
            timing.load_event_end += 1000 * (self.reads.get() - 1);
            timing
        }

        fn entries_by_type(&self, entry_type: &str) -> Vec<PerformanceEntry> {
            self.inner.entries_by_type(entry_type)
        }
    }

    impl NavigationSource for DriftingHost {
        fn navigation(&self) -> NavigationMeta {
            self.inner.navigation()
        }
    }

    impl ConnectionSource for DriftingHost {
        fn connection(&self) -> Option<ConnectionDescriptor> {
            self.inner.connection()
        }
    }

    impl ServiceWorkerSource for DriftingHost {
        fn controller(&self) -> Option<ServiceWorkerController> {
            self.inner.controller()
        }
    }

    impl EnvironmentMetadata for DriftingHost {
        fn navigator(&self) -> crate::host::NavigatorInfo {
            self.inner.navigator()
        }
    }

    #[test]
    fn test_timing_is_read_once_at_construction() {
        let host = DriftingHost {
            inner: reference_page_load(),
            reads: Cell::new(0),
        };
        let builder = PerformanceReportBuilder::new(&host, brasilia());

        let first = builder.build_raw_report();
        let second = builder.build_raw_report();
        assert_eq!(first, second);
        assert_eq!(builder.total_time(), 10215);
        assert_eq!(host.reads.get(), 1);
    }

    fn key_shape(value: &Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, inner)| (key.clone(), key_shape(inner)))
                    .collect(),
            ),
            _ => Value::Null,
        }
    }

    #[test]
    fn test_raw_and_formatted_share_keys() {
        let host = reference_page_load();
        let builder = PerformanceReportBuilder::new(&host, brasilia());

        let raw = serde_json::to_value(builder.build_raw_report()).expect("Invalid JSON");
        let formatted = serde_json::to_value(builder.build_formatted_report()).expect("Invalid JSON");
        assert_eq!(key_shape(&raw), key_shape(&formatted));

        let sections: Vec<&str> = raw
            .as_object()
            .expect("Report is not an object")
            .keys()
            .map(String::as_str)
            .collect();
        let mut expected = vec![
            "AppCache", "Browser", "Connection", "DNS", "NavigationType", "Navigator", "OnLoad",
            "Paint", "Processing", "Redirect", "Request", "Response", "ServiceWorker", "TCP",
            "Total",
        ];
        expected.sort();
        let mut sections = sections;
        sections.sort();
        assert_eq!(sections, expected);

        assert_eq!(raw["TCP"]["startSSL"], Value::from(0));
        assert_eq!(raw["Redirect"]["count"], Value::from(0));
        assert_eq!(raw["Total"]["networkLatency"], Value::from(1448));
        assert_eq!(raw["Paint"]["first-paint"]["when"], Value::from(1526059510507_i64));
        assert_eq!(raw["ServiceWorker"]["scriptUrl"], Value::from("https://example.org"));
        assert_eq!(formatted["Total"]["duration"], Value::from("10.22s"));
    }

    #[test]
    fn test_works_through_trait_object() {
        let host = reference_page_load();
        let dyn_host: &dyn Host = &host;
        let builder = PerformanceReportBuilder::new(dyn_host, brasilia());
        assert_eq!(builder.total_time(), 10215);
    }
}
