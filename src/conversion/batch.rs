use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use super::convert::{convert_image, ConversionResult};
use super::ConversionRequest;

/// Aggregated outcome of a batch run.
///
/// `total` is the number of files handed to the driver; when a run is
/// cancelled mid-way `succeeded + failed` is less than `total`.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<(PathBuf, String)>,
}

impl BatchSummary {
    pub fn completed(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn was_cancelled(&self) -> bool {
        self.completed() < self.total
    }
}

/// Sequentially convert every file in the list, folding results into a
/// [`BatchSummary`].
///
/// `cancel` is checked once per file boundary: when it becomes true the
/// remaining files are skipped and the results gathered so far are kept.
/// `progress` is invoked after every file with the 1-based count of
/// completed files.
pub fn run_batch<F>(
    files: &[PathBuf],
    request: &ConversionRequest,
    cancel: &AtomicBool,
    mut progress: F,
) -> BatchSummary
where
    F: FnMut(usize, &ConversionResult),
{
    let mut summary = BatchSummary {
        total: files.len(),
        ..Default::default()
    };

    for (index, path) in files.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            break;
        }

        let result = convert_image(path, &request.output_dir, request.format, request.quality);
        match &result.error {
            None => summary.succeeded += 1,
            Some(message) => {
                summary.failed += 1;
                summary.failures.push((result.input_path.clone(), message.clone()));
            }
        }

        progress(index + 1, &result);
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::format::TargetFormat;
    use image::{Rgb, RgbImage};
    use std::path::Path;

    fn request(dir: &Path) -> ConversionRequest {
        ConversionRequest {
            input_dir: dir.to_path_buf(),
            output_dir: dir.join("out"),
            format: TargetFormat::Png,
            quality: 85,
            recursive: false,
        }
    }

    fn write_image(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(8, 8, Rgb([10, 20, 30])).save(&path).unwrap();
        path
    }

    #[test]
    fn test_mixed_batch_counts_successes_and_failures() {
        let tmp = tempfile::tempdir().unwrap();
        let good = write_image(tmp.path(), "good.bmp");
        let bad = tmp.path().join("bad.bmp");
        std::fs::write(&bad, b"truncated").unwrap();

        let req = request(tmp.path());
        let cancel = AtomicBool::new(false);
        let summary = run_batch(&[good.clone(), bad.clone()], &req, &cancel, |_, _| {});

        assert_eq!(summary.total, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].0, bad);
        assert!(req.output_dir.join("good.png").is_file());
    }

    #[test]
    fn test_cancellation_skips_remaining_files() {
        let tmp = tempfile::tempdir().unwrap();
        let files = vec![
            write_image(tmp.path(), "a.bmp"),
            write_image(tmp.path(), "b.bmp"),
            write_image(tmp.path(), "c.bmp"),
        ];

        let req = request(tmp.path());
        let cancel = AtomicBool::new(false);
        let summary = run_batch(&files, &req, &cancel, |count, _| {
            if count == 1 {
                cancel.store(true, Ordering::Relaxed);
            }
        });

        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 0);
        assert!(summary.was_cancelled());
    }

    #[test]
    fn test_empty_file_list() {
        let tmp = tempfile::tempdir().unwrap();
        let req = request(tmp.path());
        let cancel = AtomicBool::new(false);
        let summary = run_batch(&[], &req, &cancel, |_, _| {});

        assert_eq!(summary.total, 0);
        assert!(!summary.was_cancelled());
    }
}
