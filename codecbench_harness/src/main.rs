use anyhow::Context;
use clap::{Parser, Subcommand};

use codecbench_codecs::{codec_by_name, ALL_CODECS};
use codecbench_harness::{evaluate_codec, CodecReport, HarnessConfig};

// ── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "codecbench",
    about = "Correctness and latency harness for interchangeable block codecs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the staged harness (round-trip, concatenation, latency sweep)
    Run {
        /// Codec to test: lz4 | deflate | snappy (default: all)
        #[arg(short, long)]
        codec: Option<String>,
        /// Block size for the correctness stages, in bytes
        #[arg(short, long, default_value_t = 4096)]
        block_size: usize,
        /// Timed repetitions per benchmark cell
        #[arg(short, long, default_value_t = 200)]
        iterations: usize,
        /// Comma-separated block sizes for the latency sweep
        #[arg(long, default_value = "1024,4096,16384,65536")]
        sizes: String,
        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the codecs the registry knows
    List,
}

// ── Rendering ──────────────────────────────────────────────────────────────

fn fmt_ns(ns: u64) -> String {
    if ns < 1_000 {
        format!("{ns} ns")
    } else if ns < 1_000_000 {
        format!("{:.1} µs", ns as f64 / 1_000.0)
    } else {
        format!("{:.2} ms", ns as f64 / 1_000_000.0)
    }
}

fn print_report(report: &CodecReport) {
    println!("=== {} ===", report.codec);
    println!("  round-trip     : {}", report.round_trip);
    println!("  concatenation  : {}", report.concatenation);
    println!("  benchmark      : {}", report.benchmark);
    if !report.rows.is_empty() {
        println!(
            "  {:>10}  {:>13}  {:>10}  {:>10}  {:>10}  {:>10}",
            "block", "strategy", "min", "median", "p99", "max"
        );
        for row in &report.rows {
            let l = &row.latency;
            println!(
                "  {:>10}  {:>13}  {:>10}  {:>10}  {:>10}  {:>10}",
                row.block_len,
                row.strategy.to_string(),
                fmt_ns(l.min_ns),
                fmt_ns(l.median_ns),
                fmt_ns(l.p99_ns),
                fmt_ns(l.max_ns),
            );
        }
    }
    println!();
}

// ── Subcommand implementations ─────────────────────────────────────────────

fn run(
    codec: Option<String>,
    block_size: usize,
    iterations: usize,
    sizes: &str,
    json: bool,
) -> anyhow::Result<()> {
    let bench_sizes: Vec<usize> = sizes
        .split(',')
        .map(|s| s.trim().parse::<usize>().with_context(|| format!("bad size '{s}'")))
        .collect::<anyhow::Result<_>>()?;

    let config = HarnessConfig {
        block_len: block_size,
        bench_sizes,
        iterations,
    };

    let names: Vec<&str> = match &codec {
        Some(name) => vec![name.as_str()],
        None => ALL_CODECS.to_vec(),
    };

    let mut reports = Vec::new();
    for name in names {
        let codec = codec_by_name(name)?;
        if !json {
            eprintln!("testing {}...", codec.name());
        }
        reports.push(evaluate_codec(codec.as_ref(), &config));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }

    let failed = reports.iter().filter(|r| !r.passed()).count();
    if failed > 0 {
        anyhow::bail!("{failed} codec(s) had a failed stage");
    }
    Ok(())
}

fn list() {
    for name in ALL_CODECS {
        let codec = codec_by_name(name).expect("registry lists only known codecs");
        let fast = match codec.decompress_fast(&[], &mut []) {
            Err(codecbench_core::CodecError::Unsupported(_)) => "no",
            _ => "yes",
        };
        println!("  {:<10} fast decode: {}", codec.name(), fast);
    }
}

// ── Entry point ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            codec,
            block_size,
            iterations,
            sizes,
            json,
        } => run(codec, block_size, iterations, &sizes, json),
        Commands::List => {
            list();
            Ok(())
        }
    }
}
