mod json;
mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::analysis::UnusedReport;
use miette::Result;
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Default)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

/// Reporter for outputting unused asset results
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
    include_code: bool,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
            output_path,
            include_code: false,
        }
    }

    /// Whether scripts were part of the candidate set
    pub fn with_include_code(mut self, include_code: bool) -> Self {
        self.include_code = include_code;
        self
    }

    pub fn report(&self, report: &UnusedReport) -> Result<()> {
        match &self.format {
            ReportFormat::Terminal => TerminalReporter::new(self.include_code).report(report),
            ReportFormat::Json => {
                JsonReporter::new(self.output_path.clone(), self.include_code).report(report)
            },
        }
    }
}
