mod commands;
mod output;
mod prompt;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commands::{handle_alias, handle_mailboxes, handle_whoami, run_set_key, AliasCommands};
use log::debug;
use output::{report_error, ExitCode, OutputFormat};
use simplelogin_client::{Config, Settings};

#[derive(Parser)]
#[command(name = "simplelogin")]
#[command(about = "Create and manage SimpleLogin email aliases", long_about = None)]
struct Cli {
    /// SimpleLogin base URL (overrides SIMPLELOGIN_BASE_URL and the stored URL)
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// API key (overrides SIMPLELOGIN_API_KEY and the stored key)
    #[arg(long, global = true)]
    api_key: Option<String>,
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "auto")]
    output: OutputFormat,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store API key and base URL
    SetKey,
    /// Show account info for the current API key
    Whoami,
    /// List mailboxes; `*` marks the default owner for new aliases
    Mailboxes,
    #[command(flatten)]
    Alias(AliasCommands),
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Environment over file over defaults, then command-line flags on top
fn load_settings(cli: &Cli) -> Result<Settings> {
    let config = Config::load()?;
    Ok(config
        .resolve_from_env()
        .with_overrides(cli.base_url.as_deref(), cli.api_key.as_deref()))
}

async fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(&cli)?;
    debug!("settings: {:?}", settings);

    match cli.command {
        Commands::SetKey => run_set_key(cli.api_key, cli.base_url, &settings),
        Commands::Whoami => handle_whoami(&settings, cli.output).await,
        Commands::Mailboxes => handle_mailboxes(&settings, cli.output).await,
        Commands::Alias(cmd) => handle_alias(&settings, cli.output, cmd).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let format = cli.output;
    let code = match run(cli).await {
        Ok(()) => ExitCode::Success,
        Err(err) => {
            report_error(&err, format);
            ExitCode::for_error(&err)
        }
    };

    std::process::exit(code.code());
}
