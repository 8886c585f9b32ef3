//! Print the structure of a compressed vbyte64 file.

use clap::Parser;
use log::error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "vb64-inspect")]
#[command(about = "Show the header, region sizes and width histogram of vbyte64 files")]
struct Args {
    /// Files written by `compress_to_file` (or framed buffers dumped to disk)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print summaries as JSON
    #[arg(long)]
    json: bool,
}

fn print_summary(path: &Path, summary: &vbyte64::Summary) {
    println!("{}", path.display());
    println!("  values:      {}", summary.count);
    println!("  key region:  {} bytes", summary.key_len);
    println!("  data region: {} bytes", summary.data_len);
    println!("  total:       {} bytes ({:.2}x vs raw)", summary.logical_len(), summary.ratio());
    println!("  widths:");
    for (w, &n) in summary.widths.iter().enumerate() {
        if n == 0 {
            continue;
        }
        let pct = 100.0 * n as f64 / summary.count.max(1) as f64;
        println!("    {w} bytes: {n:>12} ({pct:5.1}%)");
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let mut failed = false;

    for path in &args.files {
        match vbyte64::inspect_file(path) {
            Ok(summary) if args.json => match serde_json::to_string(&summary) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    error!("{}: {e}", path.display());
                    failed = true;
                }
            },
            Ok(summary) => print_summary(path, &summary),
            Err(e) => {
                error!("{}: {e}", path.display());
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
