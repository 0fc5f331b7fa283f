use clap::Parser;
use kiosk::cli::commands::Cli;
use kiosk::cli::handlers;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto).ok();

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
