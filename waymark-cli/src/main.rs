//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use waymark_cli::CliError;

fn main() {
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    match waymark_cli::run() {
        Ok(()) => {}
        // Clap renders help, version and usage errors itself.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            log::error!("{err}");
            eprintln!("waymark: {err}");
            std::process::exit(1);
        }
    }
}
