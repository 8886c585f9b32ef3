//! Round-trip random u64 arrays through vbyte64 and time each phase.

use clap::{Parser, ValueEnum};
use log::{error, info};
use rand::Rng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

/// One value of every width class, used by `--mode sanity`
const SANITY: [u64; 15] = [
    0,
    13,
    16,
    17,
    20,
    20,
    241,
    65_282,
    16_776_963,
    16_776_963,
    4_294_967_044,
    1_099_511_562_245,
    281_474_959_933_446,
    72_057_589_743_656_967,
    18_446_742_974_376_182_038,
];

#[derive(Debug, Clone, Copy, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Mode {
    /// Unframed in-memory buffer, count passed separately
    Buffer,
    /// In-memory buffer with the count header
    Framed,
    /// Stream straight to a file and back
    File,
    /// Fixed sample array, printed value by value
    Sanity,
}

#[derive(Debug, Clone, Copy, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Distribution {
    /// Uniform over the full u64 range
    Uniform,
    /// Sorted with small random gaps (IDs, timestamps)
    Sorted,
    /// Uniform over 1..=8 byte widths
    Mixed,
}

#[derive(Parser)]
#[command(name = "vb64-bench")]
#[command(about = "Round-trip random u64 arrays through vbyte64 and report timings")]
struct Args {
    /// Number of values to generate
    #[arg(short, long, default_value = "500000")]
    count: usize,

    /// Where the compressed stream goes
    #[arg(short, long, value_enum, default_value = "framed")]
    mode: Mode,

    /// Value distribution
    #[arg(short, long, value_enum, default_value = "sorted")]
    distribution: Distribution,

    /// Store deltas between consecutive values
    #[arg(long)]
    delta: bool,

    /// Output file for `--mode file`
    #[arg(short, long, default_value = "compressed.vb64")]
    output: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    mode: Mode,
    distribution: Distribution,
    delta: bool,
    count: usize,
    raw_bytes: usize,
    compressed_bytes: usize,
    ratio: f64,
    generate_ms: f64,
    encode_ms: f64,
    decode_ms: f64,
    errors: usize,
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn generate(count: usize, distribution: Distribution) -> Vec<u64> {
    let mut rng = rand::rng();
    match distribution {
        Distribution::Uniform => (0..count).map(|_| rng.random()).collect(),
        Distribution::Sorted => {
            let mut acc: u64 = rng.random_range(0..1_000_000);
            (0..count)
                .map(|_| {
                    acc = acc.wrapping_add(rng.random_range(0..1_000));
                    acc
                })
                .collect()
        }
        Distribution::Mixed => (0..count)
            .map(|_| {
                let bytes = rng.random_range(1..=8u32);
                let v: u64 = rng.random();
                if bytes == 8 { v } else { v & ((1u64 << (8 * bytes)) - 1) }
            })
            .collect(),
    }
}

/// Encode and decode `values`, returning (compressed size, decoded values, encode time, decode time)
fn roundtrip(
    values: &[u64],
    mode: Mode,
    delta: bool,
    output: &Path,
) -> vbyte64::Result<(usize, Vec<u64>, Duration, Duration)> {
    match mode {
        Mode::File => {
            let t0 = Instant::now();
            let written = vbyte64::compress_to_file(values, delta, output)?;
            let encode = t0.elapsed();

            let t1 = Instant::now();
            let decoded = vbyte64::decompress_from_file(output, delta)?;
            Ok((written as usize, decoded, encode, t1.elapsed()))
        }
        Mode::Buffer | Mode::Framed | Mode::Sanity => {
            let opts = vbyte64::Options::new().delta(delta).framed(!matches!(mode, Mode::Buffer));

            let t0 = Instant::now();
            let compressed = opts.compress(values)?;
            let encode = t0.elapsed();

            let t1 = Instant::now();
            let decoded = opts.decompress(compressed.as_bytes(), Some(values.len()))?;
            Ok((compressed.len(), decoded, encode, t1.elapsed()))
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let t0 = Instant::now();
    let values = match args.mode {
        Mode::Sanity => SANITY.to_vec(),
        _ => generate(args.count, args.distribution),
    };
    let generate_time = t0.elapsed();
    info!("generated {} values in {:.1} ms", values.len(), millis(generate_time));

    let (compressed_bytes, decoded, encode, decode) = match roundtrip(&values, args.mode, args.delta, &args.output) {
        Ok(r) => r,
        Err(e) => {
            error!("round-trip failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if matches!(args.mode, Mode::Sanity) {
        for (i, (d, o)) in values.iter().zip(decoded.iter()).enumerate() {
            println!("data[{i:2}] = {d}");
            println!("deco[{i:2}] = {o}");
        }
    }

    let errors = values.iter().zip(decoded.iter()).filter(|(a, b)| a != b).count()
        + values.len().abs_diff(decoded.len());
    let raw_bytes = values.len() * 8;

    let report = Report {
        mode: args.mode,
        distribution: args.distribution,
        delta: args.delta,
        count: values.len(),
        raw_bytes,
        compressed_bytes,
        ratio: raw_bytes as f64 / compressed_bytes.max(1) as f64,
        generate_ms: millis(generate_time),
        encode_ms: millis(encode),
        decode_ms: millis(decode),
        errors,
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("failed to serialize report: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("[encode] {:>10.1} ms  {} -> {} bytes ({:.2}x)", report.encode_ms, raw_bytes, compressed_bytes, report.ratio);
        println!("[decode] {:>10.1} ms  n = {}", report.decode_ms, decoded.len());
        println!("[decode] errors = {errors}");
    }

    if errors == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
