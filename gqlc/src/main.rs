mod commands;
mod ops;
mod reports;
mod source;

use clap::Parser;
use eyre::Result;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::Cli;

/// Route engine logs to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,gqlc=info,gqlc_codegen=info,gqlc_codegen_csharp=info".to_string(),
            2 => "info,gqlc=debug,gqlc_codegen=debug,gqlc_codegen_csharp=debug,gqlc_schema=debug"
                .to_string(),
            _ => "debug,gqlc=trace,gqlc_codegen=trace,gqlc_schema=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 2)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.run()
}
