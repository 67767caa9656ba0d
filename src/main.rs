use anyhow::Result;
use clap::Parser;
use console::style;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

mod cli;
mod conversion;
mod interactive;
mod utils;

use cli::{Args, DEFAULT_QUALITY};
use conversion::{discover_images, run_batch, BatchSummary, ConversionRequest};
use utils::{create_progress_bar, error_println, format_duration, warn_println};

fn main() -> Result<()> {
    println!(
        "{}",
        style("imgbatch - Batch Image Format Converter").bold().blue()
    );
    println!();

    // No flags at all drops into the interactive prompt loop
    if std::env::args().len() <= 1 {
        return interactive::run();
    }

    let args = Args::parse();

    if !args.input_dir.is_dir() {
        error_println(&format!(
            "Input directory does not exist: {}",
            args.input_dir.display()
        ));
        return Ok(());
    }

    if args.quality > 100 {
        warn_println(&format!(
            "Quality {} is out of range (0-100), using default {}",
            args.quality, DEFAULT_QUALITY
        ));
    }

    let request = ConversionRequest {
        input_dir: args.input_dir.clone(),
        output_dir: args.output_dir.clone(),
        format: args.format,
        quality: args.effective_quality(),
        recursive: args.recursive,
    };

    run_conversion(&request)
}

/// Discover, convert and report one batch. Shared by the flag path and the
/// interactive prompt; every failure is reported to the terminal rather
/// than bubbling out of the process.
pub fn run_conversion(request: &ConversionRequest) -> Result<()> {
    let start_time = Instant::now();

    println!("Scanning for images in {}...", request.input_dir.display());
    let image_files = match discover_images(&request.input_dir, request.recursive) {
        Ok(files) => files,
        Err(e) => {
            error_println(&format!("Failed to scan input directory: {:#}", e));
            return Ok(());
        }
    };

    if image_files.is_empty() {
        println!("{}", style("No image files found").yellow());
        return Ok(());
    }

    println!(
        "Found {} images, converting to {}...",
        style(image_files.len()).bold(),
        style(request.format).bold()
    );

    let progress = create_progress_bar(image_files.len() as u64);
    let cancel = AtomicBool::new(false);
    let summary = run_batch(&image_files, request, &cancel, |_, result| {
        if let Some(name) = result.input_path.file_name().and_then(|n| n.to_str()) {
            progress.set_message(name.to_string());
        }
        progress.inc(1);
    });
    progress.finish_and_clear();

    print_summary(&summary, &request.output_dir, start_time.elapsed());
    Ok(())
}

fn print_summary(summary: &BatchSummary, output_dir: &Path, elapsed: Duration) {
    println!();
    println!("{}", style("Conversion complete!").bold().green());
    println!("  Succeeded: {}", style(summary.succeeded).bold().green());
    if summary.failed > 0 {
        println!("  Failed: {}", style(summary.failed).bold().red());
    }

    if !summary.failures.is_empty() {
        println!();
        println!("{}", style("Failures:").bold().red());
        for (path, error) in &summary.failures {
            println!("  {}: {}", style(path.display()).bold(), error);
        }
    }

    let output_display = std::fs::canonicalize(output_dir)
        .unwrap_or_else(|_| output_dir.to_path_buf());
    println!();
    println!("  Output directory: {}", output_display.display());
    println!("  Total time: {}", style(format_duration(elapsed)).dim());
}
