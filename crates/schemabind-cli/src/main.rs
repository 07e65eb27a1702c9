//! schemabind CLI - Binding generator front end
//!
//! Commands:
//! - `schemabind generate` - Generate bindings for a bundle and write them to disk
//! - `schemabind check` - Validate a schemabind.toml project and its bundle without writing

use clap::{Parser, Subcommand};

mod config;
mod generate;
mod logging;

#[derive(Parser)]
#[command(name = "schemabind")]
#[command(author, version, about = "Generate native bindings from schema bundles", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); overrides RUST_LOG
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors; overrides RUST_LOG
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate bindings and write them to the output directory
    Generate {
        /// Path to schemabind.toml (default: ./schemabind.toml)
        #[arg(short, long)]
        config: Option<String>,

        /// Bundle JSON file, overriding [input] bundle
        #[arg(short, long)]
        bundle: Option<String>,

        /// Output directory, overriding [output] directory
        #[arg(short, long)]
        output: Option<String>,

        /// Worker threads, overriding [generator] jobs
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Validate a schemabind.toml project and generate in memory
    Check {
        /// Path to schemabind.toml (default: ./schemabind.toml)
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Generate {
            config,
            bundle,
            output,
            jobs,
        } => {
            let overrides = generate::Overrides {
                bundle,
                output,
                jobs,
            };
            generate::run(config, overrides)?;
        }
        Commands::Check { config } => {
            config::check(config)?;
        }
    }

    Ok(())
}
