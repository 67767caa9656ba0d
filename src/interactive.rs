// Interactive prompt loop, used when the binary is started without flags.
// Collects the same fields as the CLI and re-prompts on invalid input.

use anyhow::Result;
use console::style;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::cli::DEFAULT_QUALITY;
use crate::conversion::{ConversionRequest, TargetFormat};
use crate::utils::{error_println, warn_println};

pub fn run() -> Result<()> {
    println!("{}", style("Interactive mode").bold());
    println!("Put the images to convert in one folder, then follow the prompts.");

    loop {
        println!();
        println!("1. Convert a folder of images");
        println!("2. Quit");

        match prompt("Select an option (1-2): ")?.as_str() {
            "1" => {
                let request = collect_request()?;

                println!();
                println!("{}", style("Conversion parameters").bold());
                println!("  Input directory: {}", request.input_dir.display());
                println!("  Output directory: {}", request.output_dir.display());
                println!("  Target format: {}", request.format);
                println!("  Recursive: {}", if request.recursive { "yes" } else { "no" });
                println!("  Quality: {}", request.quality);

                if !prompt("Start conversion? (y/n): ")?.eq_ignore_ascii_case("y") {
                    println!("Conversion cancelled");
                    continue;
                }

                crate::run_conversion(&request)?;

                let again = prompt("Convert another folder? (y/n, default: y): ")?;
                if !(again.is_empty() || again.eq_ignore_ascii_case("y")) {
                    break;
                }
            }
            "2" => break,
            other => error_println(&format!("Invalid option '{}', enter 1 or 2", other)),
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn collect_request() -> Result<ConversionRequest> {
    let input_dir = loop {
        let answer = prompt("Input directory: ")?;
        let path = PathBuf::from(&answer);
        if path.is_dir() {
            break path;
        }
        error_println(&format!("'{}' is not a directory", answer));
    };

    let output_answer = prompt("Output directory (default: output): ")?;
    let output_dir = if output_answer.is_empty() {
        PathBuf::from("output")
    } else {
        PathBuf::from(output_answer)
    };

    let format = loop {
        let answer = prompt("Target format (jpg/jpeg/png/bmp/gif/tiff/tif/webp/ico): ")?;
        match TargetFormat::parse(&answer) {
            Some(format) => break format,
            None => error_println(&format!("Unsupported format '{}'", answer)),
        }
    };

    let recursive = prompt("Recurse into subdirectories? (y/n, default: n): ")?
        .eq_ignore_ascii_case("y");

    let quality = parse_quality(&prompt(&format!(
        "Quality (0-100, default: {}): ",
        DEFAULT_QUALITY
    ))?);

    Ok(ConversionRequest {
        input_dir,
        output_dir,
        format,
        quality,
        recursive,
    })
}

/// Blank input means the default; anything unparsable or out of range
/// falls back to the default with a warning, matching the CLI policy.
fn parse_quality(input: &str) -> u8 {
    if input.is_empty() {
        return DEFAULT_QUALITY;
    }
    match input.parse::<i64>() {
        Ok(value @ 0..=100) => value as u8,
        Ok(value) => {
            warn_println(&format!(
                "Quality {} is out of range (0-100), using default {}",
                value, DEFAULT_QUALITY
            ));
            DEFAULT_QUALITY
        }
        Err(_) => {
            warn_println(&format!(
                "Invalid quality '{}', using default {}",
                input, DEFAULT_QUALITY
            ));
            DEFAULT_QUALITY
        }
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}
