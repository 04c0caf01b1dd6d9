use crate::analysis::{UnusedAsset, UnusedReport};
use crate::discovery::AssetKind;
use colored::Colorize;
use miette::Result;
use std::collections::BTreeMap;

/// Terminal reporter with colored output
pub struct TerminalReporter {
    /// Scripts were part of the candidate set
    include_code: bool,
}

impl TerminalReporter {
    pub fn new(include_code: bool) -> Self {
        Self { include_code }
    }

    pub fn report(&self, report: &UnusedReport) -> Result<()> {
        if report.is_empty() {
            println!("{}", "No unused assets found!".green().bold());
            return Ok(());
        }

        // Group by directory, keeping catalog order inside each group
        let mut by_dir: BTreeMap<&str, Vec<&UnusedAsset>> = BTreeMap::new();
        for entry in report {
            by_dir.entry(entry.path.parent()).or_default().push(entry);
        }

        println!();
        println!(
            "{}",
            format!("Unused Assets Found: {}", report.len()).yellow().bold()
        );
        println!();

        for (dir, entries) in &by_dir {
            println!("{}", dir.cyan().bold());
            for entry in entries {
                self.print_entry(entry);
            }
            println!();
        }

        self.print_summary(report);

        Ok(())
    }

    fn print_entry(&self, entry: &UnusedAsset) {
        let marker = match entry.kind {
            AssetKind::Code => "◆".magenta(),
            AssetKind::Asset | AssetKind::Sidecar => "○".yellow(),
        };

        println!(
            "  {} {} [{}]",
            marker,
            entry.path.as_str().white(),
            entry.reason.code().dimmed()
        );

        println!("    {} {}", "→".dimmed(), entry.message().dimmed());
    }

    fn print_summary(&self, report: &UnusedReport) {
        let assets = report.count_kind(AssetKind::Asset);
        let scripts = report.count_kind(AssetKind::Code);

        println!("{}", "─".repeat(60).dimmed());

        let mut parts = Vec::new();
        if assets > 0 {
            parts.push(format!("{} assets", assets).yellow().to_string());
        }
        if scripts > 0 {
            parts.push(format!("{} scripts", scripts).magenta().to_string());
        }
        println!("Summary: {}", parts.join(", "));
        println!();

        if scripts > 0 {
            println!(
                "{}",
                "⚠ Scripts are matched by name only; loading by reflection or string is not detected"
                    .yellow()
            );
        }
        println!(
            "{}",
            "Tip: Run with --delete to pick assets to remove".dimmed()
        );
        if !self.include_code {
            println!(
                "{}",
                "Tip: Use --include-scripts to also check .cs files".dimmed()
            );
        }
    }
}
