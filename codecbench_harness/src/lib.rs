pub mod report;
pub mod stages;

pub use report::{BenchRow, CodecReport, DecodeStrategy, StageStatus};
pub use stages::{evaluate_codec, HarnessConfig};
