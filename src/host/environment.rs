use serde::{Deserialize, Serialize};

/// The host's network connection descriptor (`navigator.connection`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionDescriptor {
    /// Estimated bandwidth in megabits per second.
    pub downlink: Option<f64>,
    pub effective_type: Option<String>,
    /// Estimated round-trip time in milliseconds.
    pub rtt: Option<f64>,
    #[serde(rename = "type")]
    pub connection_type: Option<String>,
}

/// The service worker currently controlling the page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceWorkerController {
    pub state: String,
    #[serde(default)]
    pub script_url: Option<String>,
}

/// Descriptive navigator fields, copied into the report untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigatorInfo {
    pub app_code_name: Option<String>,
    pub app_name: Option<String>,
    pub app_version: Option<String>,
    pub cookie_enabled: Option<bool>,
    pub language: Option<String>,
    pub platform: Option<String>,
    pub product: Option<String>,
    pub product_sub: Option<String>,
    pub user_agent: Option<String>,
    pub vendor: Option<String>,
}
