mod commands;
mod output;
mod plan;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{ExportCommand, ShowCommand, SummaryCommand};

#[derive(Parser)]
#[command(name = "planview")]
#[command(about = "Parse and visualize Terraform/OpenTofu plan output", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a plan as a colored diff in the terminal
    Show {
        /// Path to a file with plan output (reads stdin when omitted)
        file: Option<String>,

        /// Use the built-in sample plan instead of reading input
        #[arg(long)]
        sample: bool,

        /// Compact output without spacing between resources
        #[arg(long)]
        compact: bool,

        /// Also show attributes that carry no change symbol
        #[arg(long)]
        show_unchanged: bool,

        /// Disable terminal colors
        #[arg(long)]
        no_color: bool,
    },

    /// Export a parsed plan as JSON or HTML
    Export {
        /// Path to a file with plan output (reads stdin when omitted)
        file: Option<String>,

        /// Use the built-in sample plan instead of reading input
        #[arg(long)]
        sample: bool,

        /// Export format: json or html
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print change counts for a plan
    Summary {
        /// Path to a file with plan output (reads stdin when omitted)
        file: Option<String>,

        /// Use the built-in sample plan instead of reading input
        #[arg(long)]
        sample: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Show {
            file,
            sample,
            compact,
            show_unchanged,
            no_color,
        } => {
            ShowCommand::execute(file.as_deref(), sample, compact, show_unchanged, no_color)?;
        }
        Commands::Export {
            file,
            sample,
            format,
            output,
        } => {
            ExportCommand::execute(file.as_deref(), sample, &format, output.as_deref())?;
        }
        Commands::Summary { file, sample } => {
            SummaryCommand::execute(file.as_deref(), sample)?;
        }
    }

    Ok(())
}
