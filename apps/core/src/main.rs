use clap::Parser;

fn main() {
    let options = tickerlink_core::runtime::CliOptions::parse();

    if let Err(error) = tickerlink_core::logging::init() {
        eprintln!("[tickerlink] logging unavailable: {error}");
    }

    if let Err(error) = tickerlink_core::runtime::run_with_options(options) {
        tracing::error!(%error, "runtime failed");
        eprintln!("[tickerlink] {error}");
        std::process::exit(error.exit_code());
    }
}
