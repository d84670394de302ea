mod export;
mod show;
mod summary;

pub use export::ExportCommand;
pub use show::ShowCommand;
pub use summary::SummaryCommand;

use std::io::Read;

use anyhow::{Context, Result};

use crate::plan::SAMPLE_PLAN;

/// Read plan text from the built-in sample, a file, or stdin
pub fn read_plan_input(file: Option<&str>, sample: bool) -> Result<String> {
    if sample {
        return Ok(SAMPLE_PLAN.to_string());
    }

    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read plan file {}", path)),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read plan text from stdin")?;
            Ok(buffer)
        }
    }
}
