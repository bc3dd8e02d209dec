use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use u_rulemerge::cli::{self, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli::run(&cli) {
        Ok(result) => {
            if result.truncated {
                eprintln!(
                    "warning: merge stopped after {} iterations; output may be partial",
                    result.merge_iterations
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "u_rulemerge=debug"
    } else {
        "u_rulemerge=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
