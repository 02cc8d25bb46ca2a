//! `attendance` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments, resolve configuration and start logging.
//! - Hand interactive sessions to the menu; run one-shot commands directly.

mod cli;
mod console;
mod error;
mod menu;

use clap::Parser;

fn main() {
    let result = cli::run(cli::Cli::parse());
    // The logger handle lives in a static and is never dropped.
    log::logger().flush();
    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
