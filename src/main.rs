use clap::Parser;
use tracing_subscriber::EnvFilter;

use contig_origin::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("contig_origin=debug,info")
    } else {
        EnvFilter::new("contig_origin=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Resolve(args) => {
            cli::resolve::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Coverage(args) => {
            cli::coverage::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
