//! lintrc CLI
//!
//! Command-line interface for loading, validating and resolving linter
//! configuration files

mod commands;
mod output;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use is_terminal::IsTerminal;
use lintrc_core::{Result, init_tracing};
use std::io;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "lintrc")]
#[command(about = "lintrc: resolve linter configuration and its presets")]
#[command(version = lintrc_core::VERSION)]
#[command(
    long_about = "lintrc loads a declarative linter configuration, layers it over the presets\n\
it extends and prints the effective configuration a linting engine consumes.\n\
\n\
Examples:\n  \
lintrc config init                      # Create .lintrc.json\n  \
lintrc config validate                  # Check the discovered config\n  \
lintrc config show --resolved           # Print the effective configuration\n  \
lintrc --preset-dir presets config show --resolved --format yaml"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        env = "LINTRC_CONFIG",
        help = "Path to configuration file (.lintrc.json/.lintrc.yaml/.lintrc.toml)"
    )]
    config: Option<PathBuf>,

    /// Directories searched for presets referenced by name
    #[arg(
        long = "preset-dir",
        global = true,
        env = "LINTRC_PRESET_PATH",
        value_delimiter = ':',
        help = "Directory to search for named presets (can be used multiple times)"
    )]
    preset_dirs: Vec<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Generate shell completion script
    #[arg(
        long,
        value_enum,
        help = "Generate completion script for specified shell"
    )]
    generate_completion: Option<Shell>,
}

#[derive(Subcommand)]
enum Commands {
    /// Configuration file management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version information
    #[command(alias = "ver")]
    Version {
        /// Show detailed version information
        #[arg(long, help = "Show detailed version and build information")]
        detailed: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Initialize a new configuration file
    Init {
        /// Configuration file format
        #[arg(long, default_value = "json", help = "Configuration file format")]
        format: ConfigFormat,

        /// Overwrite existing configuration file
        #[arg(long, help = "Overwrite existing configuration file")]
        force: bool,

        /// Include example globals and rules
        #[arg(long, help = "Include example globals and rules")]
        with_examples: bool,
    },

    /// Validate configuration file and the presets it extends
    Validate {
        /// Path to configuration file to validate
        #[arg(help = "Path to configuration file (default: search for .lintrc)")]
        path: Option<PathBuf>,
    },

    /// Show current configuration
    Show {
        /// Show resolved configuration (after inheritance and merging)
        #[arg(long, help = "Show resolved configuration after inheritance")]
        resolved: bool,

        /// Output format
        #[arg(long, default_value = "json", help = "Output format")]
        format: ConfigFormat,
    },

    /// Print the JSON Schema of the configuration format
    Schema,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ConfigFormat {
    /// JSON configuration format
    Json,
    /// YAML configuration format
    Yaml,
    /// TOML configuration format
    Toml,
}

fn main() {
    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.generate_completion {
        generate_completion_script(shell);
        return;
    }

    let use_colors =
        !cli.no_color && std::env::var("NO_COLOR").is_err() && io::stdout().is_terminal();
    colored::control::set_override(use_colors);

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "lintrc=error,lintrc_core=error", // Only errors by default
        1 => "lintrc=warn,lintrc_core=warn",
        2 => "lintrc=info,lintrc_core=info",
        3 => "lintrc=debug,lintrc_core=debug",
        _ => "lintrc=trace,lintrc_core=trace",
    };
    init_tracing(log_level);

    if let Err(e) = run_command(cli) {
        error!("lintrc failed: {}", e);
        std::process::exit(1);
    }
}

fn generate_completion_script(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init {
                format,
                force,
                with_examples,
            } => commands::config::init_command(format, force, with_examples),
            ConfigAction::Validate { path } => commands::config::validate_command(
                path.or(cli.config),
                &cli.preset_dirs,
            ),
            ConfigAction::Show { resolved, format } => {
                commands::config::show_command(resolved, format, cli.config, &cli.preset_dirs)
            }
            ConfigAction::Schema => commands::config::schema_command(),
        },

        Some(Commands::Version { detailed }) => {
            commands::version_command(detailed);
            Ok(())
        }

        None => {
            // No subcommand provided, show help
            let mut cmd = Cli::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
