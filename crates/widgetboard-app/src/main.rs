//! Command-line entry point.

use clap::Parser;
use widgetboard_app::{App, AppError, Cli, Command};
use widgetboard_core::EditorConfig;

fn main() {
    env_logger::init();
    log::info!("Starting WidgetBoard");

    let cli = Cli::parse();
    if let Err(e) = run(&cli.command) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: &Command) -> Result<(), AppError> {
    let config = EditorConfig::load()?;
    let app = App::new(config)?;
    let output = app.run(command)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
