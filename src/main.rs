//! Binary entry point: parse flags, optionally start file logging, and drive
//! the Ratatui event loop until the user exits.
use clap::Parser;
use survival_pack::logging::init_logging;
use survival_pack::{run_app, App, Cli, Settings};

fn main() -> anyhow::Result<()> {
    let settings = Settings::from_cli(Cli::parse())?;
    let _logger = match &settings.logging {
        Some(log_settings) => Some(init_logging(log_settings)?),
        None => None,
    };

    let mut app = App::new(settings);
    let result = run_app(&mut app);
    app.shutdown();
    result
}
