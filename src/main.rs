use std::process::ExitCode;

mod error;
mod input;
mod config;
mod view;
mod render;
mod cli;

fn main() -> ExitCode {
    use tracing_subscriber::{FmtSubscriber, EnvFilter};

    // logs go to stderr so rendered pages can be piped from stdout
    if let Err(err) = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init() {
        eprintln!("failed to initialize global tracing subscriber: {}", err);
    }

    match cli::start() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);

            ExitCode::FAILURE
        }
    }
}
