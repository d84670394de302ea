use anyhow::{Context, Result};

use super::read_plan_input;
use crate::output;
use crate::plan::{HtmlRenderer, PlanParser, PlanRenderer, RenderOptions};

/// Handles the 'export' command - serializes a parsed plan to JSON or HTML
pub struct ExportCommand;

impl ExportCommand {
    /// Execute the export command
    pub fn execute(
        file: Option<&str>,
        sample: bool,
        format: &str,
        output_path: Option<&str>,
    ) -> Result<()> {
        let input = read_plan_input(file, sample)?;
        let plan = PlanParser::new().parse(&input);

        let rendered = match format {
            "json" => {
                serde_json::to_string_pretty(&plan).context("Failed to serialize plan to JSON")?
            }
            "html" => {
                let options = RenderOptions {
                    show_unchanged: true,
                    ..RenderOptions::default()
                };
                HtmlRenderer::new().render(&plan, &options)
            }
            other => anyhow::bail!("Unsupported export format '{}' (expected json or html)", other),
        };

        match output_path {
            Some(path) => {
                std::fs::write(path, rendered)
                    .with_context(|| format!("Failed to write {}", path))?;
                output::success(&format!("Exported plan to {}", path));
            }
            None => println!("{}", rendered),
        }

        Ok(())
    }
}
