//! Output rendering and formatting

use console::{Style, Term};
use std::io;
use tkbuild_types::{BuildReport, ColorChoice};

/// Output renderer for CLI results
pub struct OutputRenderer {
    json_output: bool,
    color_choice: ColorChoice,
    term: Term,
}

impl OutputRenderer {
    #[must_use]
    pub fn new(json_output: bool, color_choice: ColorChoice) -> Self {
        Self {
            json_output,
            color_choice,
            term: Term::stdout(),
        }
    }

    /// Render the final build report
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be serialized in JSON mode.
    pub fn render_report(&self, report: &BuildReport) -> io::Result<()> {
        println!("{}", self.report_output(report)?);
        Ok(())
    }

    /// Build the report output without printing it
    ///
    /// JSON mode produces a machine-readable document; otherwise a
    /// human-readable summary.
    fn report_output(&self, report: &BuildReport) -> io::Result<String> {
        if self.json_output {
            serde_json::to_string_pretty(report).map_err(io::Error::other)
        } else {
            Ok(self.render_summary(report))
        }
    }

    fn render_summary(&self, report: &BuildReport) -> String {
        let stages: Vec<&str> = report.stages.iter().map(|s| s.as_str()).collect();
        let mut out = Vec::new();

        out.push(String::new());
        out.push(self.heading("Build Summary"));
        out.push(format!("  Platform: {}", report.platform));
        out.push(format!("  Profile:  {}", report.profile));
        out.push(format!("  Stages:   {}", stages.join(", ")));

        if let Some(package_dir) = &report.package_dir {
            if report.artifacts.is_empty() {
                out.push("  Artifacts: none".to_string());
            } else {
                out.push(format!("  Artifacts ({}):", report.artifacts.len()));
                for artifact in &report.artifacts {
                    let name = artifact.file_name().map_or_else(
                        || artifact.display().to_string(),
                        |n| n.to_string_lossy().into_owned(),
                    );
                    out.push(format!("    • {name}"));
                }
            }
            out.push(format!("  Package:  {}", package_dir.display()));
        }

        out.push(format!("  Duration: {}ms", report.duration_ms));

        if report.short_circuited() {
            out.push(String::new());
            out.push("Stopped early: later steps were not requested.".to_string());
        }

        out.join("\n")
    }

    fn heading(&self, text: &str) -> String {
        if self.supports_color() {
            Style::new().bold().apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn supports_color(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.term.features().colors_supported(),
        }
    }
}
