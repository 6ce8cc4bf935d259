use std::collections::BTreeMap;

use serde::Serialize;

use super::format::Field;
use crate::host::NavigatorInfo;

/// A start/end/duration triple for one timing phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interval {
    pub start: Field,
    pub end: Field,
    pub duration: Field,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TcpInterval {
    pub start: Field,
    #[serde(rename = "startSSL")]
    pub start_ssl: Field,
    pub end: Field,
    pub duration: Field,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedirectInterval {
    #[serde(flatten)]
    pub interval: Interval,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalInterval {
    #[serde(flatten)]
    pub interval: Interval,
    pub network_latency: Field,
}

/// Connection details as reported; every field is `None` when the host
/// exposes no connection descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    pub downlink: Option<Field>,
    pub effective_type: Option<Field>,
    pub roundtrip_time: Option<Field>,
    #[serde(rename = "type")]
    pub connection_type: Option<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaintTime {
    pub when: Field,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceWorkerInfo {
    pub activated: bool,
    pub script_url: Option<String>,
}

/// The full performance report. Raw and formatted reports share this shape
/// and differ only in how [`Field`] values are represented.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    #[serde(rename = "AppCache")]
    pub app_cache: Interval,
    #[serde(rename = "Browser")]
    pub browser: Interval,
    #[serde(rename = "Connection")]
    pub connection: ConnectionInfo,
    #[serde(rename = "DNS")]
    pub dns: Interval,
    #[serde(rename = "NavigationType")]
    pub navigation_type: String,
    #[serde(rename = "Navigator")]
    pub navigator: NavigatorInfo,
    #[serde(rename = "OnLoad")]
    pub on_load: Interval,
    #[serde(rename = "Paint")]
    pub paint: BTreeMap<String, PaintTime>,
    #[serde(rename = "Processing")]
    pub processing: Interval,
    #[serde(rename = "Redirect")]
    pub redirect: RedirectInterval,
    #[serde(rename = "Request")]
    pub request: Interval,
    #[serde(rename = "Response")]
    pub response: Interval,
    #[serde(rename = "ServiceWorker")]
    pub service_worker: ServiceWorkerInfo,
    #[serde(rename = "TCP")]
    pub tcp: TcpInterval,
    #[serde(rename = "Total")]
    pub total: TotalInterval,
}
