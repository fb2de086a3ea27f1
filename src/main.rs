use clap::Parser;
use framefit::config::{self, SyncConfig};
use framefit::sync;
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "framefit")]
#[command(about = "Batch-fit photos onto a fixed-aspect letterbox canvas")]
#[command(long_about = "\
Batch-fit photos onto a fixed-aspect letterbox canvas

Scans the input directory recursively for jpg/jpeg/png files, centers each
photo on a 5:3 canvas backed by a blurred copy of itself (or solid black
with --solid-background), stretches the canvas to exactly WIDTH x HEIGHT,
and writes it to the output directory as a numbered {n}.jpg.

Runs are incremental. A ledger file records every completed conversion;
inputs already in the ledger are skipped, and outputs whose inputs have
since disappeared are deleted. Numbering continues from the ledger's entry
count, so re-runs never renumber existing outputs.

A photo that fails to decode is reported and skipped; the rest of the batch
still completes, and the exit status is non-zero.")]
#[command(version = version_string())]
struct Cli {
    /// Input directory, scanned recursively
    #[arg(long)]
    input: PathBuf,

    /// Output directory for numbered {n}.jpg files (created if absent)
    #[arg(long)]
    output: PathBuf,

    /// Ledger file path [default: <output>/processed.json]
    #[arg(long)]
    ledger: Option<PathBuf>,

    /// Letterbox with solid black instead of a blurred copy of the photo
    #[arg(long)]
    solid_background: bool,

    /// Output width in pixels
    #[arg(long, default_value_t = 2000)]
    width: u32,

    /// Output height in pixels
    #[arg(long, default_value_t = 1200)]
    height: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let ledger_path = cli
        .ledger
        .unwrap_or_else(|| config::default_ledger_path(&cli.output));
    let config = SyncConfig {
        input_dir: cli.input,
        output_dir: cli.output,
        ledger_path,
        blurred_background: !cli.solid_background,
        target_width: cli.width,
        target_height: cli.height,
    };

    let report = sync::sync(&config)?;
    println!("Sync: {}", report.stats);

    if !report.failures.is_empty() {
        eprintln!(
            "{} file(s) could not be converted; see warnings above",
            report.failures.len()
        );
        std::process::exit(1);
    }
    Ok(())
}
