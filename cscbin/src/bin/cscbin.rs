//! cscbin CLI: inspect and load labeled CSC binary matrices

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use cscbin::{
    assemble, CscReader, ReaderConfig, SparseMatrix, TrailingDataPolicy, Validation,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cscbin",
    version,
    about = "Inspect and load labeled CSC binary sparse matrices"
)]
struct Cli {
    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show header fields, extents and diagnostics of a matrix file
    Inspect {
        /// Path to the binary matrix file
        matrix: PathBuf,

        /// Skip column pointer and row index validation
        #[arg(long)]
        unchecked: bool,

        /// Fail when bytes follow the row indices
        #[arg(long)]
        strict_eof: bool,

        /// Print a JSON summary instead of text
        #[arg(long)]
        json: bool,
    },
    /// Load a matrix with bin row labels and cell column labels
    Load {
        /// Path to the binary matrix file
        #[arg(long)]
        matrix: PathBuf,

        /// Chromosome name used for row labels
        #[arg(long)]
        chr: String,

        /// Path to the cell label file
        #[arg(long)]
        cells: PathBuf,

        /// Reader configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print a JSON summary instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Inspect {
            matrix,
            unchecked,
            strict_eof,
            json,
        } => {
            let mut config = ReaderConfig::default();
            if unchecked {
                config = config.with_validation(Validation::Unchecked);
            }
            if strict_eof {
                config = config.with_trailing_data(TrailingDataPolicy::Error);
            }

            let decoded = CscReader::new(config).decode_file(&matrix)?;
            let m = &decoded.matrix;
            if json {
                println!("{}", serde_json::to_string_pretty(&serde_json::json!({
                    "path": matrix.display().to_string(),
                    "num_rows": m.num_rows(),
                    "num_cols": m.num_cols(),
                    "nnz": m.nnz(),
                    "density": m.density(),
                    "diagnostics": decoded.diagnostics,
                }))?);
            } else {
                println!("Matrix: {}", matrix.display());
                println!("   Dimensions: {} x {}", m.num_rows(), m.num_cols());
                println!("   Non-zeros: {}", m.nnz());
                println!("   Density: {:.6}%", m.density() * 100.0);
                for diagnostic in &decoded.diagnostics {
                    println!("   Warning: {diagnostic}");
                }
            }
        }
        Commands::Load {
            matrix,
            chr,
            cells,
            config,
            json,
        } => {
            let config = match config {
                Some(path) => ReaderConfig::from_json_file(path)?,
                None => ReaderConfig::default(),
            };
            let labeled = assemble(&matrix, &chr, &cells, &config)?;
            let summary = labeled.summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Matrix: {} ({chr})", matrix.display());
                println!("   Dimensions: {} x {}", summary.num_rows, summary.num_cols);
                println!("   Non-zeros: {}", summary.nnz);
                if let Some(label) = &summary.first_row_label {
                    println!("   First row: {label}");
                }
                if let Some(label) = &summary.first_col_label {
                    println!("   First column: {label}");
                }
                for diagnostic in &summary.diagnostics {
                    println!("   Warning: {diagnostic}");
                }
            }
        }
    }
    Ok(())
}
