use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use cribro_core::{OptimizeConfig, Optimizer, Outcome, RequestMeta};

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Pre-filter web page markup before content extraction
#[derive(Parser, Debug)]
#[command(name = "cribro")]
#[command(author = "Cribro Contributors")]
#[command(version)]
#[command(about = "Pre-filter web page markup before content extraction", long_about = None)]
struct Args {
    /// Local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the JSON run report instead of the optimized markup
    #[arg(long)]
    report: bool,

    /// Source URL recorded in the report
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Page title, folded into the scoring query when one is given
    #[arg(long, value_name = "TITLE")]
    title: Option<String>,

    /// Query text to score blocks against (default: document centroid)
    #[arg(short, long, value_name = "TEXT")]
    query: Option<String>,

    /// Minimum candidate block length in characters
    #[arg(long, default_value = "80", value_name = "NUM")]
    min_text_length: usize,

    /// Fraction of blocks retained by rank
    #[arg(long, default_value = "0.2", value_name = "RATIO")]
    content_ratio: f64,

    /// Absolute floor on rank-based retention
    #[arg(long, default_value = "80", value_name = "NUM")]
    min_keep_k: usize,

    /// Link density ceiling for the quality filter
    #[arg(long, default_value = "0.3", value_name = "RATIO")]
    max_link_density: f64,

    /// Bypass the pipeline (input passes through unchanged)
    #[arg(long)]
    disabled: bool,

    /// Enable progress output
    #[arg(short, long)]
    verbose: bool,
}

/// Format file size for display
fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        echo::print_banner();
    }

    let html = if args.input == "-" {
        if args.verbose {
            echo::print_step(1, 3, "Reading from stdin");
        }
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else {
        if args.verbose {
            echo::print_step(1, 3, &format!("Reading {}", args.input));
        }
        fs::read_to_string(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?
    };

    if args.verbose {
        echo::print_info(&format!("Input size: {}", format_size(html.len())));
    }

    let config = OptimizeConfig::builder()
        .enabled(!args.disabled)
        .min_text_length(args.min_text_length)
        .content_ratio(args.content_ratio)
        .min_keep_k(args.min_keep_k)
        .max_link_density(args.max_link_density)
        .build();

    let optimizer = Optimizer::with_config(config);
    let meta = RequestMeta {
        url: args.url.as_deref(),
        title: args.title.as_deref(),
        query: args.query.as_deref(),
    };

    if args.verbose {
        echo::print_step(2, 3, "Running the pre-filter pipeline");
    }

    let start = Instant::now();
    let (optimized, run_report) = optimizer.optimize_with(&html, &meta);
    let elapsed = start.elapsed();

    if args.verbose {
        match run_report.optimization {
            Outcome::Optimized => {
                let c = &run_report.counts;
                echo::print_info(&format!(
                    "Blocks: {} candidates → {} cleaned → {} quality-passed → {} retained → {} selected",
                    c.candidates, c.cleaned, c.quality_passed, c.retained, c.diversified
                ));
            }
            Outcome::Disabled => echo::print_info("Pipeline disabled, input passed through"),
            Outcome::NoContentBlocks => echo::print_info("No content blocks found, input passed through"),
            Outcome::Failed => {
                echo::print_warning(&format!(
                    "Optimization failed, input passed through: {}",
                    run_report.error.as_deref().unwrap_or("unknown error")
                ));
            }
        }
        echo::print_timing("optimize", elapsed);
        echo::print_step(3, 3, "Writing output");
    }

    let payload = if args.report {
        serde_json::to_string_pretty(&run_report).context("Failed to serialize report")?
    } else {
        optimized
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &payload).with_context(|| format!("Failed to write output: {}", path.display()))?;
            if args.verbose {
                echo::print_success(&format!(
                    "Wrote {} to {}",
                    format_size(payload.len()),
                    path.display()
                ));
            }
        }
        None => {
            println!("{}", payload);
            if args.verbose {
                echo::print_success("Done");
            }
        }
    }

    Ok(())
}
