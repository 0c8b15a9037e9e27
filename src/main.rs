//! aclfw - wildcard-mask access control lists
//!
//! Command-line front end for rendering firewall documents as device
//! configuration and for testing addresses against their rules.
//!
//! # Usage
//!
//! ```bash
//! aclfw show edge.json --group 101         # Print device configuration
//! aclfw check 192.168.1.5 edge.json -g 101 # Test an address against each rule
//! aclfw match 10.0.0.9 10.0.0.0 0.0.0.255 --explain
//! aclfw config --group 101                 # Persist the default group
//! ```
//!
//! Without a document path, `firewall.json` in the data directory is used.

use aclfw::config::{self, AppConfig};
use aclfw::core::address::{Address, WildcardMask, matches, working_pattern};
use aclfw::core::loader;
use aclfw::{Error, Firewall};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "aclfw", version)]
#[command(about = "Wildcard-mask access lists - render and query", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the device configuration for a firewall document
    Show {
        /// Firewall document (default: firewall.json in the data directory)
        document: Option<PathBuf>,
        /// Access group number or name
        #[arg(short, long)]
        group: Option<String>,
    },
    /// Test an address against every rule of a firewall document
    Check {
        /// Candidate source address
        address: String,
        /// Firewall document (default: firewall.json in the data directory)
        document: Option<PathBuf>,
        /// Access group number or name
        #[arg(short, long)]
        group: Option<String>,
    },
    /// Test an address against a reference address and wildcard mask
    Match {
        address: String,
        reference: String,
        mask: String,
        /// Print the bit strings and working pattern
        #[arg(short, long)]
        explain: bool,
    },
    /// Show or update persisted settings
    Config {
        /// Default access group
        #[arg(long)]
        group: Option<String>,
        /// Directive written in the first column of rule lines
        #[arg(long)]
        list_label: Option<String>,
        /// Log to a file in the state directory instead of stderr
        #[arg(long)]
        log_to_file: Option<bool>,
    },
}

fn main() -> ExitCode {
    let _ = aclfw::utils::ensure_dirs();
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let settings = runtime.block_on(config::load_config());
    init_logging(&settings);

    match runtime.block_on(handle_cli(cli.command, settings)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(hint) = e.suggestion() {
                eprintln!("Hint: {hint}");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(settings: &AppConfig) {
    if settings.log_to_file
        && let Some(mut log_path) = aclfw::utils::get_state_dir()
    {
        log_path.push("aclfw.log");
        if let Ok(file) = std::fs::File::create(log_path) {
            tracing_subscriber::fmt().with_writer(file).init();
            return;
        }
    }
    // Terminal output: warnings only
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_group(group: Option<String>, settings: &AppConfig) -> Result<String, Error> {
    group
        .or_else(|| settings.default_group.clone())
        .ok_or_else(|| Error::Validation {
            field: "group".to_string(),
            message: "no access group given; pass --group or run `aclfw config --group <ID>`"
                .to_string(),
        })
}

async fn open_firewall(
    document: Option<PathBuf>,
    group: Option<String>,
    settings: &AppConfig,
) -> Result<Firewall, Error> {
    let group = resolve_group(group, settings)?;
    let path = match document.or_else(loader::default_document_path) {
        Some(path) => path,
        None => {
            return Err(Error::Validation {
                field: "document".to_string(),
                message: "no data directory available; pass a document path".to_string(),
            });
        }
    };
    loader::load_firewall(&path, &group, &settings.list_label).await
}

async fn handle_cli(command: Commands, settings: AppConfig) -> Result<(), Error> {
    match command {
        Commands::Show { document, group } => {
            let firewall = open_firewall(document, group, &settings).await?;
            print!("{}", firewall.to_text());
        }
        Commands::Check {
            address,
            document,
            group,
        } => {
            let candidate: Address = address.parse()?;
            let firewall = open_firewall(document, group, &settings).await?;
            let acl = firewall.acl();

            println!("Access group {} ({} rules):", firewall.group_id(), acl.len());
            for (index, rule) in acl.iter().enumerate() {
                let status = if rule.query_permit(candidate) {
                    "permits"
                } else if rule.matches_source(candidate) {
                    "matches (deny)"
                } else {
                    "no match"
                };
                let cidr = rule
                    .source()
                    .to_network()
                    .map(|net| format!("  [{net}]"))
                    .unwrap_or_default();
                println!(
                    "  {index:>4}  {status:<14}  {} {}{cidr}",
                    rule.access(),
                    rule.source()
                );
            }
            println!(
                "{} of {} rules permit {candidate}",
                acl.matching(candidate).count(),
                acl.len()
            );
        }
        Commands::Match {
            address,
            reference,
            mask,
            explain,
        } => {
            let candidate: Address = address.parse()?;
            let reference: Address = reference.parse()?;
            let mask: WildcardMask = mask.parse()?;
            let matched = matches(candidate, reference, mask);

            if explain {
                println!("candidate  {}", candidate.to_bits());
                println!("reference  {}", reference.to_bits());
                println!("mask       {}", mask.to_bits());
                println!(
                    "pattern    {}",
                    working_pattern(reference, mask).replace('.', "")
                );
            }
            println!("{}", if matched { "match" } else { "no match" });
        }
        Commands::Config {
            group,
            list_label,
            log_to_file,
        } => {
            let mut settings = settings;
            let changed = group.is_some() || list_label.is_some() || log_to_file.is_some();

            if let Some(group) = group {
                if let Some(warning) =
                    aclfw::validators::validate_group_id(&group).map_err(|message| {
                        Error::Validation {
                            field: "group".to_string(),
                            message,
                        }
                    })?
                {
                    eprintln!("Warning: {warning}");
                }
                settings.default_group = Some(group);
            }
            if let Some(label) = list_label {
                settings.list_label = aclfw::validators::validate_list_label(&label).map_err(
                    |message| Error::Validation {
                        field: "list_label".to_string(),
                        message,
                    },
                )?;
            }
            if let Some(flag) = log_to_file {
                settings.log_to_file = flag;
            }

            if changed {
                config::save_config(&settings).await?;
                tracing::info!("Settings saved");
            }
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }
    Ok(())
}
