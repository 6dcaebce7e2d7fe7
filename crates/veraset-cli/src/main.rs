// Veraset CLI entry point

use clap::Parser;
use veraset_cli::{load_config, logging, output, Cli, CommandRouter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            output::print_error(&e.user_message());
            std::process::exit(1);
        }
    };

    logging::init_logging(cli.verbose, cli.quiet, &config.logging.level);
    tracing::debug!(?config, "Configuration loaded");

    if let Err(e) = CommandRouter::execute(&cli, config).await {
        output::print_error(&e.user_message());
        if cli.verbose {
            eprintln!("{}", e.technical_details());
        }
        std::process::exit(1);
    }
}
