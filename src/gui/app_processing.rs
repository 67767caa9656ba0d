// Conversion logic for the GUI: one background worker thread does all the
// work, the UI thread only reads ProgressMessage values from the channel.

use super::{ConverterApp, ProgressMessage};
use imgbatch::conversion::{discover_images, run_batch, ConversionRequest};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;

// Keep the failure list in the results area short
const MAX_FAILURES_SHOWN: usize = 10;

impl ConverterApp {
    pub fn start_conversion(&mut self) {
        if self.input_path.is_empty() {
            self.error_message = "Please select an input directory".to_string();
            return;
        }
        if self.output_path.is_empty() {
            self.error_message = "Please select an output directory".to_string();
            return;
        }

        let input_dir = PathBuf::from(self.input_path.clone());
        if !input_dir.is_dir() {
            self.error_message = format!("'{}' is not a directory", self.input_path);
            return;
        }

        // Clear previous state
        self.is_converting = true;
        self.progress = 0.0;
        self.processed_count = 0;
        self.total_count = 0;
        self.error_message.clear();
        self.results_message.clear();
        self.failure_lines.clear();

        // Channel for progress updates, flag for cooperative cancellation
        let (tx, rx) = channel();
        self.progress_receiver = Some(rx);
        let cancel = Arc::new(AtomicBool::new(false));
        self.cancel_flag = Some(cancel.clone());

        let request = ConversionRequest {
            input_dir,
            output_dir: PathBuf::from(self.output_path.clone()),
            format: self.target_format,
            quality: self.quality,
            recursive: self.recursive,
        };

        std::thread::spawn(move || {
            let image_files = match discover_images(&request.input_dir, request.recursive) {
                Ok(files) => files,
                Err(e) => {
                    let _ = tx.send(ProgressMessage::Error(format!(
                        "Failed to scan input directory: {:#}",
                        e
                    )));
                    return;
                }
            };

            if image_files.is_empty() {
                let _ = tx.send(ProgressMessage::Error(
                    "No images found in input directory".to_string(),
                ));
                return;
            }

            let total = image_files.len();
            let _ = tx.send(ProgressMessage::Progress {
                current: 0,
                total,
                file: "Starting...".to_string(),
            });

            let progress_tx = tx.clone();
            let summary = run_batch(&image_files, &request, &cancel, |current, result| {
                let file = result
                    .input_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("unknown")
                    .to_string();
                let _ = progress_tx.send(ProgressMessage::Progress {
                    current,
                    total,
                    file,
                });
            });

            let message = if cancel.load(Ordering::Relaxed) {
                format!(
                    "Conversion stopped: {} of {} done ({} succeeded, {} failed)",
                    summary.completed(),
                    summary.total,
                    summary.succeeded,
                    summary.failed
                )
            } else if summary.failed == 0 {
                format!("✓ Successfully converted {} images", summary.succeeded)
            } else {
                format!(
                    "Converted {} images ({} succeeded, {} failed)",
                    summary.completed(),
                    summary.succeeded,
                    summary.failed
                )
            };

            let mut failures: Vec<String> = summary
                .failures
                .iter()
                .take(MAX_FAILURES_SHOWN)
                .map(|(path, error)| {
                    let name = path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("unknown");
                    format!("{}: {}", name, error)
                })
                .collect();
            if summary.failures.len() > MAX_FAILURES_SHOWN {
                failures.push(format!(
                    "... and {} more failures",
                    summary.failures.len() - MAX_FAILURES_SHOWN
                ));
            }

            let _ = tx.send(ProgressMessage::Complete { message, failures });
        });
    }

    /// Ask the worker to stop after the current file.
    pub fn cancel_conversion(&mut self) {
        if let Some(flag) = &self.cancel_flag {
            flag.store(true, Ordering::Relaxed);
        }
    }

    /// Drain progress updates from the background thread. Runs on the UI
    /// thread, which is the only place app state is mutated.
    pub fn check_progress(&mut self) {
        let mut messages = Vec::new();
        if let Some(ref receiver) = self.progress_receiver {
            while let Ok(msg) = receiver.try_recv() {
                messages.push(msg);
            }
        }

        let mut finished = false;
        for msg in messages {
            match msg {
                ProgressMessage::Progress {
                    current,
                    total,
                    file,
                } => {
                    self.processed_count = current;
                    self.total_count = total;
                    self.current_file = file;
                    if total > 0 {
                        self.progress = current as f32 / total as f32;
                    }
                }
                ProgressMessage::Complete { message, failures } => {
                    self.is_converting = false;
                    self.results_message = message;
                    self.failure_lines = failures;
                    finished = true;
                }
                ProgressMessage::Error(err) => {
                    self.is_converting = false;
                    self.error_message = err;
                    finished = true;
                }
            }
        }

        if finished {
            self.progress_receiver = None;
            self.cancel_flag = None;
        }
    }
}
