// src/main.rs

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use rpmevr::config::{self, EngineConfig};
use rpmevr::dependencies::Dependency;
use rpmevr::namespace::{self, NamespaceRecord};
use rpmevr::sense::{decode_operator, SenseFlags};
use rpmevr::version::{evr, strategy, Comparator, EvrCollector, StatsFilter, VersionSpec};
use serde::Serialize;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "rpmevr")]
#[command(author, version, about = "Compare package versions and classify dependency names", long_about = None)]
struct Cli {
    /// Engine configuration file (default: /etc/rpmevr/engine.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two versions, printing -1, 0 or 1
    Compare {
        /// Left-hand version
        a: String,
        /// Right-hand version
        b: String,
        /// Use the tilde-aware comparator regardless of configuration
        #[arg(long)]
        foreign: bool,
    },

    /// Check whether a version satisfies `<op> <required>`
    Satisfies {
        /// Candidate version
        candidate: String,
        /// Relational operator: <, <=, =, ==, !=, >=, >, =<, =>
        op: String,
        /// Required version
        required: String,
    },

    /// Classify dependency names
    Classify {
        /// Dependency names, optionally with a comparison (`"perl(DBI) >= 1.6"`)
        #[arg(required = true)]
        deps: Vec<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Decode a relational operator token
    DecodeOp {
        /// Operator token, possibly followed by other text
        token: String,
    },

    /// Parse many versions and report field statistics
    Stats {
        /// Versions to parse; reads stdin when empty or "-"
        inputs: Vec<String>,
        /// Skip absolute file paths
        #[arg(long)]
        skip_paths: bool,
        /// Skip MD5/SHA1 digest strings
        #[arg(long)]
        skip_kernel_digests: bool,
        /// Skip OCaml digest strings
        #[arg(long)]
        skip_ocaml_digests: bool,
        /// Also print the sorted E/V/R dictionary
        #[arg(long)]
        dictionary: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type
        shell: Shell,
    },
}

#[derive(Serialize)]
struct ClassifyOutput<'a> {
    input: &'a str,
    kind: &'static str,
    negated: bool,
    keyword: Option<&'a str>,
    name: &'a str,
    arch: Option<&'a str>,
    op: Option<&'static str>,
    evr: Option<&'a str>,
}

impl<'a> From<&NamespaceRecord<'a>> for ClassifyOutput<'a> {
    fn from(record: &NamespaceRecord<'a>) -> Self {
        Self {
            input: record.raw,
            kind: record.kind.as_str(),
            negated: record.negated,
            keyword: record.namespace_keyword,
            name: record.name,
            arch: record.arch,
            op: record.evr.map(|_| record.flags.operator()),
            evr: record.evr,
        }
    }
}

#[derive(Serialize)]
struct StatsOutput<'a> {
    total: usize,
    files: usize,
    kernel_digests: usize,
    ocaml_digests: usize,
    epoch_missing: usize,
    release_missing: usize,
    dictionary_len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    dictionary: Option<Vec<(&'a str, u64)>>,
}

/// Decode an operator token that must be consumed in full
fn parse_operator(op: &str) -> Result<SenseFlags> {
    let (flags, consumed) = decode_operator(Some(op));
    if op.is_empty() || flags.is_empty() || consumed != op.len() {
        bail!("Unknown operator '{}'", op);
    }
    Ok(flags)
}

/// Load the engine configuration and freeze it for this process
fn install_config(path: Option<&Path>) -> Result<&'static EngineConfig> {
    let loaded =
        EngineConfig::load_or_default(path).context("Failed to load engine configuration")?;
    Ok(config::install(loaded)?)
}

/// Command-line inputs, or stdin lines when none (or "-") were given
fn read_inputs(inputs: Vec<String>) -> Result<Vec<String>> {
    if !inputs.is_empty() && inputs != ["-"] {
        return Ok(inputs);
    }
    debug!("Reading versions from stdin");
    std::io::stdin()
        .lock()
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .context("Failed to read versions from stdin")
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        // No command provided, show help
        println!("rpmevr v{}", env!("CARGO_PKG_VERSION"));
        println!("Run 'rpmevr --help' for usage information");
        return Ok(());
    };

    let config_path = cli.config.as_deref();

    match command {
        Commands::Compare { a, b, foreign } => {
            let config = install_config(config_path)?;
            let comparator = if foreign {
                Comparator::foreign()
            } else {
                strategy::default_comparator().clone()
            };
            let a = VersionSpec::parse_with(&a, &config.evr);
            let b = VersionSpec::parse_with(&b, &config.evr);
            let ordering = evr::compare_with_options(&a, &b, &comparator, &config.evr);
            println!("{}", evr::to_sign(ordering));
            Ok(())
        }
        Commands::Satisfies {
            candidate,
            op,
            required,
        } => {
            let config = install_config(config_path)?;
            let flags = parse_operator(&op)?;
            let requirement = Dependency::new("candidate", flags, Some(required.as_str()));
            let version = VersionSpec::parse_with(&candidate, &config.evr);
            let satisfied = requirement.satisfied_by(
                &version,
                &config.overlap_options(),
                strategy::default_comparator(),
            );
            info!("{} {} {}: {}", candidate, flags, required, satisfied);
            println!("{}", if satisfied { "yes" } else { "no" });
            Ok(())
        }
        Commands::Classify { deps, json } => {
            install_config(config_path)?;
            let records: Vec<NamespaceRecord<'_>> =
                deps.iter().map(|dep| namespace::classify(dep)).collect();

            if json {
                let output: Vec<ClassifyOutput<'_>> =
                    records.iter().map(ClassifyOutput::from).collect();
                println!("{}", serde_json::to_string_pretty(&output)?);
                return Ok(());
            }

            for record in &records {
                println!("{}", record.raw);
                println!("  Kind: {} ({})", record.kind, record.kind.description());
                if record.negated {
                    println!("  Negated: yes");
                }
                if let Some(keyword) = record.namespace_keyword {
                    println!("  Keyword: {}", keyword);
                }
                println!("  Name: {}", record.name);
                if let Some(arch) = record.arch {
                    println!("  Arch: {}", arch);
                }
                if let Some(evr) = record.evr {
                    println!("  Requires: {} {}", record.flags, evr);
                }
            }
            Ok(())
        }
        Commands::DecodeOp { token } => {
            let (flags, consumed) = decode_operator(Some(&token));
            if flags.is_empty() {
                println!("unknown operator (consumed 0)");
            } else {
                println!(
                    "{} (bits {:#04x}, consumed {})",
                    flags.operator(),
                    flags.bits(),
                    consumed
                );
            }
            Ok(())
        }
        Commands::Stats {
            inputs,
            skip_paths,
            skip_kernel_digests,
            skip_ocaml_digests,
            dictionary,
            json,
        } => {
            let config = install_config(config_path)?;
            let inputs = read_inputs(inputs)?;
            let mut collector = EvrCollector::new(StatsFilter {
                skip_paths,
                skip_kernel_digests,
                skip_ocaml_digests,
            })
            .with_options(config.evr);
            collector.extend(&inputs);
            let (stats, dict) = collector.finish();

            let comparator = strategy::default_comparator();
            let sorted = dictionary.then(|| dict.sorted(comparator));

            if json {
                let output = StatsOutput {
                    total: stats.total,
                    files: stats.paths,
                    kernel_digests: stats.kernel_digests,
                    ocaml_digests: stats.ocaml_digests,
                    epoch_missing: stats.epoch_missing,
                    release_missing: stats.release_missing,
                    dictionary_len: dict.len(),
                    dictionary: sorted,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
                return Ok(());
            }

            println!(
                "{} dictlen:{} dictnb:{}",
                stats,
                dict.len(),
                dict.byte_size()
            );
            if let Some(sorted) = sorted {
                println!("E:V-R dictionary:");
                for (text, count) in sorted {
                    println!("  {:>6}  {}", count, text);
                }
            }
            Ok(())
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "rpmevr", &mut std::io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compare_command() {
        let cli = Cli::try_parse_from(["rpmevr", "compare", "1.0", "1.0~rc1", "--foreign"]).unwrap();
        match cli.command {
            Some(Commands::Compare { a, b, foreign }) => {
                assert_eq!(a, "1.0");
                assert_eq!(b, "1.0~rc1");
                assert!(foreign);
            }
            _ => panic!("expected compare command"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::try_parse_from(["rpmevr", "classify", "bash", "--config", "/tmp/engine.toml"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/engine.toml")));
    }

    #[test]
    fn test_parse_completions_command() {
        let cli = Cli::try_parse_from(["rpmevr", "completions", "bash"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Completions { shell: Shell::Bash })
        ));
    }

    #[test]
    fn test_classify_requires_input() {
        assert!(Cli::try_parse_from(["rpmevr", "classify"]).is_err());
    }

    #[test]
    fn test_parse_operator() {
        assert_eq!(parse_operator(">=").unwrap(), SenseFlags::GREATER_EQUAL);
        assert_eq!(parse_operator("=<").unwrap(), SenseFlags::LESS_EQUAL);
        assert!(parse_operator("~=").is_err());
        assert!(parse_operator(">=1.0").is_err());
        assert!(parse_operator("").is_err());
    }

    #[test]
    fn test_read_inputs_passthrough() {
        let inputs = vec!["1.0".to_string(), "2:3.0-1".to_string()];
        assert_eq!(read_inputs(inputs.clone()).unwrap(), inputs);
    }

    #[test]
    fn test_classify_output_fields() {
        let config = rpmevr::NamespaceConfig::default();
        let record = rpmevr::Classifier::new(&config).classify("glibc.x86_64 >= 2.34");
        let output = ClassifyOutput::from(&record);
        assert_eq!(output.kind, "arch");
        assert_eq!(output.name, "glibc");
        assert_eq!(output.arch, Some("x86_64"));
        assert_eq!(output.op, Some(">="));
        assert_eq!(output.evr, Some("2.34"));
    }
}
