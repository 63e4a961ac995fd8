mod formatters;

pub use formatters::{HumanFormatter, JsonFormatter, MinimalFormatter};

use anyhow::Result;
use gitfresh_core::SyncReport;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
    Minimal,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            "minimal" => Ok(Self::Minimal),
            _ => anyhow::bail!("Unknown output format: {}", s),
        }
    }
}

/// Trait for sync report formatters
pub trait ReportFormatter: Send + Sync {
    /// Format the outcome of one sync
    fn format_report(&self, report: &SyncReport) -> Result<String>;
}

/// Create a formatter based on output format
pub fn create_formatter(format: OutputFormat, use_color: bool) -> Box<dyn ReportFormatter> {
    match format {
        OutputFormat::Human => Box::new(HumanFormatter::new(use_color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Minimal => Box::new(MinimalFormatter),
    }
}
