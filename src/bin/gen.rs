//! sbrule-gen: CLI tool for generating and mirroring sing-box rule-sets.

use clap::{Parser, Subcommand};
use sbrule::{convert_dir, convert_file, Mirror, MirrorConfig};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sbrule-gen")]
#[command(version = "0.1.0")]
#[command(about = "Generate sing-box rule-sets from rule lists and mirror published ones", long_about = None)]
struct Cli {
    /// With no subcommand, convert the rules directory and mirror the
    /// published rule-sets in one run.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single rule list to a rule-set JSON file
    Convert {
        /// Input rule list file
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Convert all rule lists from the rules directory
    GenerateAll {
        /// Directory of *.txt rule lists
        #[arg(short, long, default_value = "rules")]
        rules_dir: PathBuf,

        /// Output directory for JSON files
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,
    },

    /// Mirror published rule-sets into the output directory
    Mirror {
        /// Output directory for JSON files
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        /// Override the document URL to scan for rule-set links
        #[arg(long)]
        doc_url: Option<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        None => run_all(Path::new("rules"), Path::new("output")),
        Some(Commands::Convert { input, output }) => convert_single(&input, &output),
        Some(Commands::GenerateAll {
            rules_dir,
            output_dir,
        }) => generate_all(&rules_dir, &output_dir),
        Some(Commands::Mirror {
            output_dir,
            doc_url,
        }) => mirror_all(&output_dir, doc_url),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Default run: both phases, local conversion first.
///
/// A mirror-phase failure is logged but does not fail the run; the local
/// conversions have already been written at that point.
fn run_all(rules_dir: &Path, output_dir: &Path) -> sbrule::Result<()> {
    fs::create_dir_all(output_dir)?;

    let written = convert_dir(rules_dir, output_dir)?;
    println!("Converted {} rule lists into {:?}", written, output_dir);

    let mirror = Mirror::new(MirrorConfig::default())?;
    match mirror.run(output_dir) {
        Ok(report) => {
            println!(
                "Mirrored {} of {} rule-sets ({} missing, {} failed)",
                report.mirrored, report.discovered, report.missing, report.failed
            );
        }
        Err(e) => {
            log::error!("mirror phase aborted: {}", e);
        }
    }

    Ok(())
}

fn convert_single(input: &Path, output: &Path) -> sbrule::Result<()> {
    match convert_file(input)? {
        Some(rule_set) => {
            fs::write(output, serde_json::to_string_pretty(&rule_set)?)?;
            println!("Successfully converted {:?} -> {:?}", input, output);
        }
        None => {
            println!("{:?} contains no rules, nothing written", input);
        }
    }
    Ok(())
}

fn generate_all(rules_dir: &Path, output_dir: &Path) -> sbrule::Result<()> {
    fs::create_dir_all(output_dir)?;
    let written = convert_dir(rules_dir, output_dir)?;
    println!("Converted {} rule lists into {:?}", written, output_dir);
    Ok(())
}

fn mirror_all(output_dir: &Path, doc_url: Option<String>) -> sbrule::Result<()> {
    fs::create_dir_all(output_dir)?;

    let mut config = MirrorConfig::default();
    if let Some(url) = doc_url {
        config.document_url = url;
    }

    let report = Mirror::new(config)?.run(output_dir)?;
    println!(
        "Mirrored {} of {} rule-sets ({} missing, {} failed)",
        report.mirrored, report.discovered, report.missing, report.failed
    );
    Ok(())
}
