use codecbench_core::LatencySummary;
use serde::Serialize;

/// Outcome of one harness stage for one codec.
///
/// `Unsupported` is an expected outcome (a backend declining a capability),
/// kept apart from `Failed` so a fixed-block codec's refusal of the fast
/// path never reads like corruption.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum StageStatus {
    Passed,
    Unsupported(String),
    Failed(String),
}

impl StageStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, StageStatus::Failed(_))
    }
}

impl std::fmt::Display for StageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageStatus::Passed => write!(f, "passed"),
            StageStatus::Unsupported(reason) => write!(f, "unsupported ({reason})"),
            StageStatus::Failed(reason) => write!(f, "FAILED: {reason}"),
        }
    }
}

/// Which decode path a benchmark row measured.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DecodeStrategy {
    /// `decompress`: output capacity known, exact length recovered by the
    /// codec itself.
    LengthAware,
    /// `decompress_fast`: exact original length supplied by the caller, no
    /// stored compressed length needed.
    LengthLess,
}

impl std::fmt::Display for DecodeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeStrategy::LengthAware => write!(f, "length-aware"),
            DecodeStrategy::LengthLess => write!(f, "length-less"),
        }
    }
}

/// Latency distribution for one (block size, decode strategy) cell.
#[derive(Debug, Clone, Serialize)]
pub struct BenchRow {
    pub block_len: usize,
    pub strategy: DecodeStrategy,
    #[serde(serialize_with = "serialize_summary")]
    pub latency: LatencySummary,
}

/// Per-codec result of the full staged run.
#[derive(Debug, Clone, Serialize)]
pub struct CodecReport {
    pub codec: String,
    pub round_trip: StageStatus,
    pub concatenation: StageStatus,
    pub benchmark: StageStatus,
    pub rows: Vec<BenchRow>,
}

impl CodecReport {
    pub fn passed(&self) -> bool {
        !self.round_trip.is_failed()
            && !self.concatenation.is_failed()
            && !self.benchmark.is_failed()
    }
}

fn serialize_summary<S: serde::Serializer>(
    s: &LatencySummary,
    ser: S,
) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeStruct;
    let mut st = ser.serialize_struct("LatencySummary", 7)?;
    st.serialize_field("count", &s.count)?;
    st.serialize_field("min_ns", &s.min_ns)?;
    st.serialize_field("median_ns", &s.median_ns)?;
    st.serialize_field("p95_ns", &s.p95_ns)?;
    st.serialize_field("p99_ns", &s.p99_ns)?;
    st.serialize_field("max_ns", &s.max_ns)?;
    st.serialize_field("mean_ns", &s.mean_ns)?;
    st.end()
}
