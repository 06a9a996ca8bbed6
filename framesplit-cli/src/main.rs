// framesplit-cli/src/main.rs
//
// Entry point of the `framesplit` binary: parses arguments, sets up logging,
// runs the preparation and prints any failure. Failures are reported on
// stderr only; the exit status stays at success.

use clap::Parser;
use framesplit_cli::{Cli, logging, run_prepare, terminal};

fn main() {
    let cli = Cli::parse();

    match logging::init_logging(cli.verbose, cli.log_dir.as_deref()) {
        Ok(Some(log_path)) => log::info!("Logging to {}", log_path.display()),
        Ok(None) => {}
        Err(e) => {
            terminal::print_error("Logging setup failed", &e.to_string(), None);
            return;
        }
    }

    if let Err(e) = run_prepare(&cli) {
        let suggestion = e
            .is_structural()
            .then_some("Check --root: it must be a directory with one subdirectory per category.");
        terminal::print_error("Dataset preparation failed", &e.to_string(), suggestion);
    }
}
