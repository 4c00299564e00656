use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use css_cascade_dedupe::pipeline::{self, Destination, Options};

/// Remove declarations that media-query overrides restate from the cascade.
///
/// The input file is rewritten in place unless --output or --stdout is given.
#[derive(Parser, Debug)]
#[command(name = "css-cascade-dedupe", version)]
struct Args {
    /// Stylesheet to process.
    input: PathBuf,

    /// Write the result here instead of overwriting the input.
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Print the result instead of writing any file.
    #[arg(long)]
    stdout: bool,

    /// Abort without writing if any part of the input had to be dropped.
    #[arg(long)]
    deny_warnings: bool,

    /// [possible values: "error", "warn", "info", "debug", "trace"]
    #[arg(long, env = "RUST_LOG", hide_env_values = true)]
    log: Option<String>,
}

impl Args {
    fn options(&self) -> Options {
        let destination = match (&self.output, self.stdout) {
            (_, true) => Destination::Stdout,
            (Some(path), false) => Destination::File(path.clone()),
            (None, false) => Destination::InPlace,
        };
        Options {
            input: self.input.clone(),
            destination,
            deny_warnings: self.deny_warnings,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_filters(args.log.as_deref().unwrap_or_default())
        .init();

    let options = args.options();
    match pipeline::run(&options) {
        Ok(outcome) => {
            if options.destination == Destination::Stdout {
                print!("{}", outcome.css);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
