use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::args::{ConfigArgs, SourceArgs};
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Output file (single mode) or directory (multiple mode)
    #[arg(short, long, value_name = "PATH", required_unless_present = "dry_run")]
    pub output_path: Option<PathBuf>,

    /// Print generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let config = self.config.configuration(true)?;
        let (schema, label) = self.source.load()?;

        let report = ops::generate(
            &schema,
            &config,
            &label,
            GenerateOptions {
                output: self.output_path.as_deref(),
                dry_run: self.dry_run,
            },
        )?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
