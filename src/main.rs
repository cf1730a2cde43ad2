//! Seoedit - SEO change documents on the command line.
//!
//! # Usage
//!
//! ```bash
//! seoedit decode changes.md
//! seoedit decode --json changes.md
//! seoedit normalize changes.md -o clean.md
//! seoedit encode state.json -o changes.md
//! seoedit new -o changes.md
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use seoedit::app::{App, Notice};
use seoedit::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use seoedit::document::{ColumnLabels, DocumentStats, TagStatus, decode};
use seoedit::ids::UuidIds;

/// Track SEO copy changes and exchange them as markdown
#[derive(Parser, Debug)]
#[command(name = "seoedit", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Title line written at the top of exported documents
    #[arg(long, global = true, value_name = "TEXT")]
    title: Option<String>,

    /// Leave out the title line
    #[arg(long, global = true)]
    no_title: bool,

    /// Column header language for exported tables
    #[arg(long, global = true, value_enum)]
    labels: Option<ColumnLabels>,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read a markdown document and summarise it
    Decode {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Print the decoded pages as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render a saved JSON snapshot as markdown
    Encode {
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Decode and re-encode a markdown document
    Normalize {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Write an empty document
    New {
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

fn print_summary(stats: &DocumentStats) {
    println!(
        "{} page(s), {} block(s), {} tag(s)",
        stats.pages, stats.blocks, stats.tags
    );
    for status in TagStatus::ALL {
        println!("  {:<9} {}", status.label(), stats.count(status));
    }
}

fn report(notice: &Notice) {
    match notice {
        Notice::Info(message) => tracing::info!("{message}"),
        Notice::Warning(message) => eprintln!("[warn] {message}"),
    }
}

fn emit(app: &App, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let notice = app.export_file(path)?;
            report(&notice);
        }
        None => {
            let (text, notice) = app.export_markdown();
            std::io::stdout()
                .write_all(text.as_bytes())
                .context("Failed to write to stdout")?;
            report(&notice);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&ConfigFlags {
        title: cli.title.clone(),
        no_title: cli.no_title,
        labels: cli.labels,
        verbose: cli.verbose,
    });

    init_logging(effective.verbose);
    let encode_options = effective.encode_options();

    let Some(command) = cli.command else {
        if !cli.save && !cli.clear {
            anyhow::bail!("No command given; see --help");
        }
        return Ok(());
    };

    match command {
        Command::Decode { file, json } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let pages = decode(&text);
            if json {
                let out = serde_json::to_string_pretty(&pages).context("Failed to serialize")?;
                println!("{out}");
            } else {
                print_summary(&DocumentStats::collect(&pages));
            }
        }
        Command::Encode { snapshot, output } => {
            let app = App::load_snapshot(&snapshot, UuidIds)?.with_encode_options(encode_options);
            emit(&app, output.as_deref())?;
        }
        Command::Normalize { file, output } => {
            let mut app = App::new().with_encode_options(encode_options);
            app.import_file(&file)?;
            emit(&app, output.as_deref())?;
        }
        Command::New { output } => {
            let app = App::new().with_encode_options(encode_options);
            emit(&app, output.as_deref())?;
        }
    }

    Ok(())
}
