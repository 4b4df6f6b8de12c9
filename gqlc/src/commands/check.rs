use clap::Args;
use eyre::Result;

use super::args::{ConfigArgs, SourceArgs};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub config: ConfigArgs,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let config = self.config.configuration(false)?;
        let (schema, label) = self.source.load()?;

        let report = ops::check(&schema, &config, &label)?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
