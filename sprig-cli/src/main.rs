use anyhow::Result;
use clap::Parser;
use sprig_cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Enable colors only when running in a terminal or explicitly requested
    let should_use_colors = atty::is(atty::Stream::Stdout)
        || std::env::var("FORCE_COLOR").is_ok()
        || (std::env::var("NO_COLOR").is_err()
            && std::env::var("TERM").unwrap_or_default() != "dumb");

    colored::control::set_override(should_use_colors);

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = sprig_cli::run(&cli)?;
    print!("{output}");
    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` with a level picked by `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
