use crate::analysis::UnusedReport;
use crate::discovery::AssetKind;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
    include_code: bool,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>, include_code: bool) -> Self {
        Self {
            output_path,
            include_code,
        }
    }

    pub fn report(&self, report: &UnusedReport) -> Result<()> {
        let json = self.render(report)?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }

    pub fn render(&self, report: &UnusedReport) -> Result<String> {
        serde_json::to_string_pretty(&JsonReport::from_report(report, self.include_code))
            .into_diagnostic()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    include_code: bool,
    total: usize,
    assets: Vec<JsonAsset<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonAsset<'a> {
    path: &'a str,
    kind: AssetKind,
    code: &'static str,
    message: String,
}

#[derive(Serialize)]
struct JsonSummary {
    assets: usize,
    code: usize,
}

impl<'a> JsonReport<'a> {
    fn from_report(report: &'a UnusedReport, include_code: bool) -> Self {
        let assets = report
            .iter()
            .map(|entry| JsonAsset {
                path: entry.path.as_str(),
                kind: entry.kind,
                code: entry.reason.code(),
                message: entry.message(),
            })
            .collect();

        Self {
            version: "1.0",
            include_code,
            total: report.len(),
            assets,
            summary: JsonSummary {
                assets: report.count_kind(AssetKind::Asset),
                code: report.count_kind(AssetKind::Code),
            },
        }
    }
}
