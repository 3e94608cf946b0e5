//! wiregen CLI - drives the code generator over declaration sources
//!
//! Commands:
//! - `wiregen generate` - Generate pack/unpack compilation units
//! - `wiregen check` - Run the pipeline and report diagnostics only

use clap::{Parser, Subcommand};

mod generate;
mod manifest;

#[derive(Parser)]
#[command(name = "wiregen")]
#[command(author, version, about = "Binary pack/unpack code generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate pack/unpack source for serializable types
    Generate {
        /// Declaration source files (overrides the manifest's sources)
        sources: Vec<String>,

        /// Output directory for generated units
        #[arg(short, long)]
        output: Option<String>,

        /// Path to wiregen.toml (default: ./wiregen.toml when present)
        #[arg(short, long)]
        manifest: Option<String>,

        /// Write the diagnostics as a JSON report to this path
        #[arg(short, long)]
        report: Option<String>,
    },

    /// Parse, bind, and generate without writing files; report diagnostics
    Check {
        /// Declaration source files (overrides the manifest's sources)
        sources: Vec<String>,

        /// Path to wiregen.toml (default: ./wiregen.toml when present)
        #[arg(short, long)]
        manifest: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let clean = match cli.command {
        Commands::Generate {
            sources,
            output,
            manifest,
            report,
        } => {
            let options = generate::Options::resolve(sources, output, manifest, report, false)?;
            generate::run(&options)?
        }
        Commands::Check { sources, manifest } => {
            let options = generate::Options::resolve(sources, None, manifest, None, true)?;
            generate::run(&options)?
        }
    };

    if !clean {
        std::process::exit(1);
    }
    Ok(())
}
