use anyhow::Result;
use terminal_size::{Width, terminal_size};

use super::read_plan_input;
use crate::output;
use crate::plan::{AsciiRenderer, PlanParser, PlanRenderer, RenderOptions};

/// Handles the 'show' command - renders a plan as a diff in the terminal
pub struct ShowCommand;

impl ShowCommand {
    /// Execute the show command
    pub fn execute(
        file: Option<&str>,
        sample: bool,
        compact: bool,
        show_unchanged: bool,
        no_color: bool,
    ) -> Result<()> {
        let input = read_plan_input(file, sample)?;
        let plan = PlanParser::new().parse(&input);

        // An empty parse is not a parser error; surfacing it is our call
        if plan.is_empty() {
            output::warning("No resources found in plan input");
            return Ok(());
        }

        let width = terminal_size()
            .map(|(Width(w), _)| w as usize)
            .unwrap_or(100);

        let options = RenderOptions {
            show_unchanged,
            compact_mode: compact,
            max_value_width: width.saturating_sub(40).max(20),
            color: !no_color,
        };

        print!("{}", AsciiRenderer::new().render(&plan, &options));

        Ok(())
    }
}
