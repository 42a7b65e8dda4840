use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pio_rs::programs::{by_name, CATALOG};

mod render;
use render::{render, OutputFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "Assemble bundled PIO programs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List bundled programs
    List,
    /// Assemble one program and write it out
    Emit {
        /// Program name (see `list`)
        name: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::List => {
            println!("{:<10} {:>5} {:>6}", "name", "words", "wrap");
            for (name, assemble) in CATALOG {
                let p = assemble()?;
                println!("{name:<10} {:>5} {:>3}..{}", p.len(), p.wrap_target(), p.wrap());
            }
        }
        Command::Emit { name, format, out } => {
            let assemble = by_name(&name).ok_or_else(|| anyhow!("unknown program `{name}`"))?;
            let program = assemble()?;
            info!(name = %name, words = program.len(), "assembled");
            let bytes = render(&name, &program, format)?;
            if let Some(path) = out {
                std::fs::write(&path, bytes)?;
            } else {
                std::io::stdout().write_all(&bytes)?;
            }
        }
    }
    Ok(())
}
