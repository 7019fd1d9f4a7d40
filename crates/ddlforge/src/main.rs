//! ddlforge CLI
//!
//! Command-line front end for generating per-dialect schema scripts from
//! a model manifest.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ddlforge::prelude::*;

/// Per-dialect DDL script generation from declaratively mapped types.
#[derive(Parser)]
#[command(name = "ddlforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate schema scripts and synchronize them into the output tree.
    Generate {
        /// Model manifest describing the mapped types.
        #[arg(short, long, env = "DDLFORGE_MODEL", default_value = "model.toml")]
        model: PathBuf,

        /// Destination directory for generated .sql files.
        #[arg(short, long, default_value = "src/main/sql/ddl")]
        output_dir: PathBuf,

        /// Namespace prefix to scan (repeatable).
        #[arg(short, long = "namespace", required = true)]
        namespaces: Vec<String>,

        /// Dialect identifier to generate for (repeatable).
        #[arg(short, long = "dialect", required = true)]
        dialects: Vec<String>,

        /// Emit additional history tables per entity.
        #[arg(long)]
        audit_tables: bool,

        /// Prefix create statements with corresponding drop statements.
        #[arg(long)]
        drop_statements: bool,

        /// Exclude embeddable value types from the scan.
        #[arg(long)]
        skip_embeddables: bool,

        /// Property overlay file with configuration overrides.
        #[arg(long)]
        overlay: Option<PathBuf>,

        /// Print scripts without touching the output tree.
        #[arg(long)]
        dry_run: bool,
    },

    /// List the supported dialect identifiers.
    Dialects,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Dialects => {
            for dialect in Dialect::ALL {
                println!("{dialect}");
            }
        }

        Commands::Generate {
            model,
            output_dir,
            namespaces,
            dialects,
            audit_tables,
            drop_statements,
            skip_embeddables,
            overlay,
            dry_run,
        } => {
            let context = TypeContext::from_manifest(&model)?;
            info!(
                model = %model.display(),
                types = context.len(),
                "loaded model manifest"
            );

            let mut request = GenerationRequest::new(&output_dir)
                .namespaces(namespaces)
                .dialects(dialects)
                .audit_tables(audit_tables)
                .drop_statements(drop_statements)
                .include_embeddables(!skip_embeddables);
            if let Some(path) = overlay {
                request = request.overlay(path);
            }

            if dry_run {
                for (dialect, script) in ddlforge::generate_scripts(&request, &context)? {
                    println!("-- {dialect}.sql");
                    println!("{script}");
                }
            } else {
                let results = ddlforge::generate_ddl(&request, &context)?;
                let changed = results.iter().filter(|r| r.changed).count();
                info!(
                    scripts = results.len(),
                    changed,
                    output_dir = %output_dir.display(),
                    "generation complete"
                );
            }
        }
    }

    Ok(())
}
