//! Performance reports from browser navigation timing.
//!
//! A [`host::Host`] exposes the timing facts, navigation metadata, connection
//! descriptor, service worker controller and navigator fields of one page
//! load. [`report::PerformanceReportBuilder`] turns them into a
//! [`report::Report`], either with raw millisecond values or with localized
//! dates and `ms`/`s` durations.

pub mod config;
pub mod error;
pub mod host;
pub mod report;

pub use error::NavTimingError;
pub use host::{Host, HostSnapshot};
pub use report::{LocaleFormatter, PerformanceReportBuilder, Report};
