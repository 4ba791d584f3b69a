//! deskkit CLI entry point

use std::process::ExitCode;

use clap::Parser;

use deskkit::cli::{
    app::{load_config, run_mic, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    rules_cmd::handle_rules_command,
};
use deskkit::infrastructure::{init_logging, LogTarget, XdgConfigStore};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    let config = load_config().await;
    if let Err(e) = init_logging(&config, LogTarget::StderrOrFile) {
        presenter.warn(&e.to_string());
    }

    match cli.command {
        Commands::Mic => run_mic(&presenter).await,
        Commands::Rules { action } => {
            if let Err(e) = handle_rules_command(action, &config, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
    }
}
