use sitesmith::cli::commands::{CliArgs, Commands};
use sitesmith::cli::handlers::{handle_chat, handle_config, handle_extract};
use sitesmith::util::logging::{self, LoggingConfig};
use sitesmith::VERSION;

use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("sitesmith v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Extract(extract_args) => handle_extract(extract_args),
        Commands::Chat(chat_args) => handle_chat(chat_args, args.quiet).await,
        Commands::Config(config_args) => handle_config(config_args),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let level = logging::resolve_level(args.log_level.as_deref(), args.verbose, args.quiet);

    logging::init_logging(LoggingConfig {
        level,
        ..LoggingConfig::from_env()
    });
}
