use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::{
    ConnectionDescriptor, ConnectionSource, EnvironmentMetadata, NavigationMeta, NavigationSource,
    NavigatorInfo, PerformanceEntry, ServiceWorkerController, ServiceWorkerSource, TimingFacts,
    TimingSource,
};
use crate::error::NavTimingError;

/// A captured copy of the host surfaces, loaded from YAML or JSON.
///
/// The layout mirrors what a page can dump with `JSON.stringify`:
/// `timing`, `navigation`, `entries` (keyed by entry type), the optional
/// `connection` and `serviceWorker.controller`, and `navigator`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostSnapshot {
    pub timing: TimingFacts,
    pub navigation: NavigationMeta,
    pub entries: HashMap<String, Vec<PerformanceEntry>>,
    pub connection: Option<ConnectionDescriptor>,
    pub service_worker: Option<ServiceWorkerState>,
    pub navigator: NavigatorInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceWorkerState {
    pub controller: Option<ServiceWorkerController>,
}

impl HostSnapshot {
    /// Load a snapshot from `path`, or from stdin when the path is `-`.
    pub fn load(path: &Path) -> Result<Self, NavTimingError> {
        let io_err = |source| NavTimingError::Io {
            path: path.to_path_buf(),
            source,
        };

        let contents = if path == Path::new("-") {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).map_err(io_err)?;
            buf
        } else {
            std::fs::read_to_string(path).map_err(io_err)?
        };

        log::info!("Loaded host snapshot from {}", path.display());
        Self::parse(&contents, path)
    }

    /// Parse snapshot text. JSON objects go through `serde_json`, anything
    /// else is read as YAML.
    pub fn parse(contents: &str, origin: &Path) -> Result<Self, NavTimingError> {
        if contents.trim_start().starts_with('{') {
            serde_json::from_str(contents).map_err(|source| NavTimingError::JsonInput {
                path: origin.to_path_buf(),
                source,
            })
        } else {
            serde_yaml::from_str(contents).map_err(|source| NavTimingError::Yaml {
                path: origin.to_path_buf(),
                source,
            })
        }
    }
}

impl TimingSource for HostSnapshot {
    fn timing(&self) -> TimingFacts {
        self.timing
    }

    fn entries_by_type(&self, entry_type: &str) -> Vec<PerformanceEntry> {
        self.entries.get(entry_type).cloned().unwrap_or_default()
    }
}

impl NavigationSource for HostSnapshot {
    fn navigation(&self) -> NavigationMeta {
        self.navigation
    }
}

impl ConnectionSource for HostSnapshot {
    fn connection(&self) -> Option<ConnectionDescriptor> {
        self.connection.clone()
    }
}

impl ServiceWorkerSource for HostSnapshot {
    fn controller(&self) -> Option<ServiceWorkerController> {
        self.service_worker
            .as_ref()
            .and_then(|sw| sw.controller.clone())
    }
}

impl EnvironmentMetadata for HostSnapshot {
    fn navigator(&self) -> NavigatorInfo {
        self.navigator.clone()
    }
}
