use std::{env, process::ExitCode};

use clap::Parser;
use pagemacro::cli::{Arguments, ExitStatus};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(verbose: bool) {
    let mut filter = EnvFilter::from_default_env();
    if env::var("RUST_LOG").is_err() {
        let level = if verbose { "debug" } else { "warn" };
        if let Ok(directive) = format!("pagemacro={}", level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_logging(args.verbose());

    match pagemacro::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
