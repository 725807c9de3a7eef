// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common flag: JSON output
fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of text")
}

fn build_cli() -> Command {
    Command::new("rpmevr")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Conary Contributors")
        .about("Compare package versions and classify dependency names")
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .global(true)
                .help("Engine configuration file (default: /etc/rpmevr/engine.toml if present)"),
        )
        .subcommand(
            Command::new("compare")
                .about("Compare two versions, printing -1, 0 or 1")
                .arg(Arg::new("a").required(true).help("Left-hand version"))
                .arg(Arg::new("b").required(true).help("Right-hand version"))
                .arg(
                    Arg::new("foreign")
                        .long("foreign")
                        .action(ArgAction::SetTrue)
                        .help("Use the tilde-aware comparator regardless of configuration"),
                ),
        )
        .subcommand(
            Command::new("satisfies")
                .about("Check whether a version satisfies `<op> <required>`")
                .arg(Arg::new("candidate").required(true).help("Candidate version"))
                .arg(
                    Arg::new("op")
                        .required(true)
                        .help("Relational operator: <, <=, =, ==, !=, >=, >, =<, =>"),
                )
                .arg(Arg::new("required").required(true).help("Required version")),
        )
        .subcommand(
            Command::new("classify")
                .about("Classify dependency names")
                .arg(
                    Arg::new("deps")
                        .required(true)
                        .num_args(1..)
                        .help("Dependency names, optionally with a comparison"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("decode-op")
                .about("Decode a relational operator token")
                .arg(Arg::new("token").required(true).help("Operator token")),
        )
        .subcommand(
            Command::new("stats")
                .about("Parse many versions and report field statistics")
                .arg(
                    Arg::new("inputs")
                        .num_args(0..)
                        .help("Versions to parse; reads stdin when empty or \"-\""),
                )
                .arg(
                    Arg::new("skip_paths")
                        .long("skip-paths")
                        .action(ArgAction::SetTrue)
                        .help("Skip absolute file paths"),
                )
                .arg(
                    Arg::new("skip_kernel_digests")
                        .long("skip-kernel-digests")
                        .action(ArgAction::SetTrue)
                        .help("Skip MD5/SHA1 digest strings"),
                )
                .arg(
                    Arg::new("skip_ocaml_digests")
                        .long("skip-ocaml-digests")
                        .action(ArgAction::SetTrue)
                        .help("Skip OCaml digest strings"),
                )
                .arg(
                    Arg::new("dictionary")
                        .long("dictionary")
                        .action(ArgAction::SetTrue)
                        .help("Also print the sorted E/V/R dictionary"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "zsh", "fish", "powershell", "elvish"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("rpmevr.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
