pub mod app_config;
pub mod report_config;

pub use app_config::{AppConfig, load_config, load_config_with};
pub use report_config::ReportConfig;
