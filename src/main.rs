//! license-scanner: third-party license inventory for a project tree
//!
//! Discovers a project's dependencies, identifies their licenses, and writes
//! a consolidated inventory that can be rendered as an HTML report.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use license_scanner::{
    aggregate::LicenseLabel,
    cli,
    config::{AppConfig, Validatable},
    pipeline::exit_codes,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "license-scanner")]
#[command(version)]
#[command(about = "Scan a project for third-party licenses", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Error occurred
    2  Invalid configuration

EXAMPLES:
    # Scan the current directory into Dependencies/prereqs-licenses.json
    license-scanner scan

    # Scan without contacting GitHub, labelling licenses by SPDX id
    license-scanner scan --directory ../app --no-lookup --license-label spdx-id

    # Render the inventory as HTML
    license-scanner report --output licenses.html --local-license LICENSE")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a project and write its license inventory
    Scan(ScanArgs),

    /// Render a license inventory as HTML
    Report(ReportArgs),

    /// Print an example config file or its JSON Schema
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the `scan` subcommand
#[derive(Parser)]
struct ScanArgs {
    /// Directory to be scanned (defaults to the current working directory)
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Name of the scanned module (default is the basename of the directory)
    #[arg(short, long)]
    name: Option<String>,

    /// Output file, relative to the scanned directory
    /// (default is "Dependencies/prereqs-licenses.json")
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// File name of manually generated license entries
    /// (default is "manual-licenses.json")
    #[arg(long, value_name = "FILENAME")]
    manual_licenses: Option<String>,

    /// Relative directory prefix excluded from the search (default is "Tests/")
    #[arg(long, value_name = "PREFIX")]
    skip_prefix: Option<String>,

    /// Registry field written as the license of identified entries.
    /// `full-name` (default) writes e.g. "BSD Zero Clause License",
    /// `spdx-id` writes the short identifier, e.g. "0BSD"
    #[arg(long, value_enum)]
    license_label: Option<LicenseLabel>,

    /// Do not query GitHub for licenses the registry cannot identify
    #[arg(long)]
    no_lookup: bool,

    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// GitHub request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// SPDX licenses.json to use instead of the built-in license list
    #[arg(long, value_name = "FILE")]
    license_list: Option<PathBuf>,

    /// Checkout directory under .prereqs, e.g. Darwin-arm64
    #[arg(long, value_name = "OS-ARCH")]
    prereqs_platform: Option<String>,
}

/// Arguments for the `report` subcommand
#[derive(Parser)]
struct ReportArgs {
    /// Input licenses JSON file
    #[arg(short, long, default_value = "Dependencies/prereqs-licenses.json")]
    input: PathBuf,

    /// Output HTML file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// License file for the local project
    #[arg(long, value_name = "FILE")]
    local_license: Option<PathBuf>,

    /// Page title
    #[arg(long)]
    title: Option<String>,

    /// SPDX licenses.json providing the "See Also" links
    #[arg(long, value_name = "FILE")]
    license_list: Option<PathBuf>,
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print a commented example .license-scanner.yaml
    Example,
    /// Print the JSON Schema of the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the effective configuration (defaults merged with the config file)
    Show,
}

impl ScanArgs {
    /// Only flags that were given override the config file.
    fn overrides(&self) -> AppConfig {
        let mut builder = AppConfig::builder()
            .name(self.name.clone())
            .token(self.github_token.clone())
            .timeout_secs(self.timeout)
            .license_list(self.license_list.clone())
            .prereqs_platform(self.prereqs_platform.clone())
            .lookup_enabled(!self.no_lookup);
        if let Some(directory) = &self.directory {
            builder = builder.directory(directory.clone());
        }
        if let Some(output) = &self.output {
            builder = builder.output(output.clone());
        }
        if let Some(manual) = &self.manual_licenses {
            builder = builder.manual_licenses(manual.clone());
        }
        if let Some(prefix) = &self.skip_prefix {
            builder = builder.skip_prefix(prefix.clone());
        }
        if let Some(label) = self.license_label {
            builder = builder.license_label(label);
        }
        builder.build()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match cli.command {
        Commands::Scan(args) => {
            let (config, loaded_from) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), &args.overrides());
            if let Some(path) = &loaded_from {
                tracing::debug!("Using config file {}", path.display());
            }
            exit_on_invalid(&config);

            let argv = redact_token(std::env::args().skip(1));
            let exit_code = cli::run_scan(&config, &argv)?;
            if exit_code != exit_codes::SUCCESS {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Report(args) => {
            let (mut config, _) = license_scanner::config::load_or_default(cli.config.as_deref());
            if args.license_list.is_some() {
                config.registry.license_list = args.license_list;
            }
            exit_on_invalid(&config);

            let report = cli::ReportConfig {
                input: args.input,
                output: args.output,
                local_license: args.local_license,
                title: args.title,
                quiet: cli.quiet,
            };
            let exit_code = cli::run_report(&report, &config.registry)?;
            if exit_code != exit_codes::SUCCESS {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Example => {
                print!("{}", license_scanner::config::generate_example_config());
                Ok(())
            }
            ConfigAction::Schema { output } => {
                let schema = license_scanner::config::generate_json_schema()?;
                match output {
                    Some(path) => {
                        std::fs::write(&path, &schema)
                            .with_context(|| format!("failed to write {}", path.display()))?;
                        eprintln!("Schema written to {}", path.display());
                    }
                    None => {
                        println!("{schema}");
                    }
                }
                Ok(())
            }
            ConfigAction::Show => {
                let (config, loaded_from) =
                    license_scanner::config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
        },

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "license-scanner", &mut io::stdout());
            Ok(())
        }
    }
}

/// Report every configuration problem and exit with the config error code.
fn exit_on_invalid(config: &AppConfig) {
    let errors = config.validate();
    if errors.is_empty() {
        return;
    }
    for error in &errors {
        eprintln!("Invalid configuration: {error}");
    }
    std::process::exit(exit_codes::CONFIG_ERROR);
}

/// Command-line arguments as recorded in the inventory, without the token.
fn redact_token(args: impl Iterator<Item = String>) -> Vec<String> {
    let mut redact_next = false;
    args.map(|arg| {
        if std::mem::take(&mut redact_next) {
            return "***".to_string();
        }
        if arg == "--github-token" {
            redact_next = true;
            arg
        } else if arg.starts_with("--github-token=") {
            "--github-token=***".to_string()
        } else {
            arg
        }
    })
    .collect()
}
