// Library exports for reuse by the GUI binary
pub mod cli;
pub mod conversion;
pub mod utils;

// Re-export commonly used types
pub use conversion::{
    discover_images, run_batch, BatchSummary, ConversionRequest, ConversionResult, TargetFormat,
};
