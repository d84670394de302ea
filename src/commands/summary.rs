use anyhow::Result;

use super::read_plan_input;
use crate::output;
use crate::plan::PlanParser;

/// Handles the 'summary' command - prints change counts for a plan
pub struct SummaryCommand;

impl SummaryCommand {
    /// Execute the summary command
    pub fn execute(file: Option<&str>, sample: bool) -> Result<()> {
        let input = read_plan_input(file, sample)?;
        let plan = PlanParser::new().parse(&input);

        if plan.is_empty() {
            output::warning("No resources found in plan input");
            return Ok(());
        }

        let summary = plan.summary();

        output::section("Plan Summary");
        output::key_value("To add", &summary.create.to_string());
        output::key_value("To change", &summary.update.to_string());
        output::key_value("To destroy", &summary.delete.to_string());
        output::key_value("To replace", &summary.replace.to_string());

        output::info(&format!(
            "{} change(s) across {} resource(s)",
            summary.total(),
            plan.resource_changes.len()
        ));

        Ok(())
    }
}
