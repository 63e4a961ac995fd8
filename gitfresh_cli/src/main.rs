use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use gitfresh_cli::config::{self, AppConfig, ConfigManager, get_config};
use gitfresh_cli::error::{CliError, CliResult, ExitCode};
use gitfresh_cli::orchestrators::sync_orchestrator::{SyncCommandOptions, SyncCommandOrchestrator};
use gitfresh_cli::output::OutputFormat;
use gitfresh_cli::terminal;

#[derive(Parser)]
#[command(name = "gitfresh")]
#[command(author, version, about = "Copy GitHub user profiles into Freshdesk contacts", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update the Freshdesk contact for a GitHub user
    Sync {
        /// GitHub username
        username: String,

        /// Freshdesk subdomain (<subdomain>.freshdesk.com)
        #[arg(short, long)]
        subdomain: Option<String>,

        /// Output format, defaults to human on a terminal and json otherwise
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Interactive setup for the Freshdesk API key and default subdomain
    Init {
        /// Reconfigure even if already set up
        #[arg(short, long)]
        force: bool,
    },

    /// Get a configuration value
    Get {
        /// Configuration key (e.g., freshdesk.default_subdomain)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., freshdesk.default_subdomain)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Human,
    Json,
    Minimal,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Human => OutputFormat::Human,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Minimal => OutputFormat::Minimal,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.debug);

    let code = match run(cli.command).await {
        Ok(code) => code,
        Err(err) => {
            eprint!("{}", err.format_for_user(cli.debug));
            err.exit_code()
        }
    };

    std::process::exit(code as i32);
}

fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        for module in ["gitfresh_core", "gitfresh_cli", "gitfresh"] {
            builder.filter_module(module, log::LevelFilter::Debug);
        }
        builder.format_timestamp_millis();
    }
    builder.init();
    log::debug!("Debug logging enabled");
}

async fn run(command: Commands) -> CliResult<ExitCode> {
    match command {
        Commands::Sync {
            username,
            subdomain,
            format,
        } => {
            let config = get_config()?;
            sync_command(config, username, subdomain, format).await
        }
        Commands::Config { command } => {
            config_command(command).await?;
            Ok(ExitCode::Success)
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(ExitCode::Success)
        }
    }
}

async fn sync_command(
    config: AppConfig,
    username: String,
    subdomain: Option<String>,
    format: Option<FormatArg>,
) -> CliResult<ExitCode> {
    log::debug!("Starting sync command for user: {username}");

    let format = match format {
        Some(arg) => arg.into(),
        None if terminal::is_interactive() => {
            OutputFormat::from_string(&config.output.default_format)?
        }
        None => OutputFormat::Json,
    };
    let use_color = config.output.color_enabled && terminal::supports_color();

    let options = SyncCommandOptions {
        username,
        subdomain,
        format,
        use_color,
    };

    let orchestrator = SyncCommandOrchestrator::new(config, options)?;
    if orchestrator.execute().await? {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::NotSynced)
    }
}

async fn config_command(command: ConfigCommand) -> CliResult<()> {
    let mut manager = ConfigManager::new();

    match command {
        ConfigCommand::Init { force } => {
            if !terminal::is_interactive() {
                return Err(CliError::misuse("'config init' needs an interactive terminal"));
            }
            config::interactive_init(force).await?;
        }
        ConfigCommand::Get { key } => {
            let value = manager.get(&key)?;
            println!("{value}");
        }
        ConfigCommand::Set { key, value } => {
            manager.set(&key, &value)?;
            let shown = config::display_value(&key, value);
            eprintln!(
                "{} {key} = {shown} in {}",
                "Saved".green(),
                manager.get_config_path().display()
            );
        }
        ConfigCommand::List => {
            eprintln!("Config file: {}", manager.get_config_path().display());

            let mut current_section = None;
            for (key, value) in manager.list()? {
                let (section, name) = key.split_once('.').unwrap_or(("", key.as_str()));
                if current_section != Some(section.to_string()) {
                    println!("\n[{}]", section.yellow());
                    current_section = Some(section.to_string());
                }
                println!("  {} = {value}", name.cyan());
            }
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
