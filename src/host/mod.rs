pub mod environment;
pub mod navigation;
pub mod snapshot;
pub mod timing;

pub use environment::{ConnectionDescriptor, NavigatorInfo, ServiceWorkerController};
pub use navigation::{NavigationMeta, NavigationType};
pub use snapshot::HostSnapshot;
pub use timing::{PerformanceEntry, Phase, TimingFacts};

/// Navigation timestamps and the host's entry enumeration.
pub trait TimingSource {
    fn timing(&self) -> TimingFacts;

    /// Entries recorded under `entry_type` (e.g. `"paint"`), in host order.
    fn entries_by_type(&self, entry_type: &str) -> Vec<PerformanceEntry>;
}

pub trait NavigationSource {
    fn navigation(&self) -> NavigationMeta;
}

/// Connection descriptor; `None` when the host does not expose one.
pub trait ConnectionSource {
    fn connection(&self) -> Option<ConnectionDescriptor>;
}

/// Active service worker controller; `None` when the page is not controlled.
pub trait ServiceWorkerSource {
    fn controller(&self) -> Option<ServiceWorkerController>;
}

pub trait EnvironmentMetadata {
    fn navigator(&self) -> NavigatorInfo;
}

/// Everything a report needs from the host platform.
pub trait Host:
    TimingSource + NavigationSource + ConnectionSource + ServiceWorkerSource + EnvironmentMetadata
{
}

impl<T> Host for T where
    T: TimingSource + NavigationSource + ConnectionSource + ServiceWorkerSource + EnvironmentMetadata
{
}
