pub mod builder;
pub mod format;
pub mod model;
pub mod render;

pub use builder::{FormattedStyle, PerformanceReportBuilder, RawStyle, ReportStyle};
pub use format::{Field, Locale, LocaleFormatter, Zone, format_duration};
pub use model::{
    ConnectionInfo, Interval, PaintTime, RedirectInterval, Report, ServiceWorkerInfo, TcpInterval,
    TotalInterval,
};
pub use render::{OutputFormat, render_text};
