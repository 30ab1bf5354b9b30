use std::time::Instant;

use anyhow::{bail, Context};

use codecbench_core::{ByteBuffer, Codec, CodecError, LatencySamples};

use crate::report::{BenchRow, CodecReport, DecodeStrategy, StageStatus};

/// Sentinel planted immediately past each logical output region; any codec
/// write past the requested length clobbers it.
const CANARY: u32 = 0xDEAD_BEEF;

/// Knobs for one harness run.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Block size used by the correctness stages.
    pub block_len: usize,
    /// Block sizes swept by the latency benchmark.
    pub bench_sizes: Vec<usize>,
    /// Timed repetitions per (size, strategy) cell.
    pub iterations: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            block_len: 4096,
            bench_sizes: vec![1024, 4096, 16 * 1024, 64 * 1024],
            iterations: 200,
        }
    }
}

/// Run every stage against `codec`, converting stage errors into reported
/// statuses. A failed stage never aborts the remaining stages — the point
/// of the harness is a complete per-codec picture, not an early exit.
pub fn evaluate_codec(codec: &dyn Codec, config: &HarnessConfig) -> CodecReport {
    let round_trip = status_of(run_round_trip(codec, config.block_len));

    let concatenation = status_of(run_concatenation(codec, config.block_len));

    let (benchmark, rows) = match run_benchmark(codec, config) {
        Ok(rows) => (StageStatus::Passed, rows),
        Err(e) => (status_of(Err(e)), Vec::new()),
    };

    CodecReport {
        codec: codec.name().to_string(),
        round_trip,
        concatenation,
        benchmark,
        rows,
    }
}

fn status_of(res: anyhow::Result<()>) -> StageStatus {
    match res {
        Ok(()) => StageStatus::Passed,
        Err(e) => match e.downcast_ref::<CodecError>() {
            Some(CodecError::Unsupported(_)) => StageStatus::Unsupported(e.to_string()),
            _ => StageStatus::Failed(format!("{e:#}")),
        },
    }
}

/// Compress `input` into a bound-sized buffer, trimmed to the bytes written.
fn compress_block(codec: &dyn Codec, input: &ByteBuffer) -> anyhow::Result<ByteBuffer> {
    let bound = codec.max_compressed_len(input.len());
    let mut out = ByteBuffer::new(bound);
    let written = codec.compress(input.as_slice(), out.as_mut_slice())?;
    if written > bound {
        bail!(
            "compress wrote {written} bytes, exceeding the declared bound of {bound}"
        );
    }
    out.trim(written);
    Ok(out)
}

/// Stage 1: single-block round-trip must be byte-exact and length-exact.
pub fn run_round_trip(codec: &dyn Codec, block_len: usize) -> anyhow::Result<()> {
    let input = ByteBuffer::random(block_len);
    let compressed = compress_block(codec, &input).context("round-trip compress")?;

    let mut recovered = ByteBuffer::new(block_len);
    let n = codec
        .decompress(compressed.as_slice(), recovered.as_mut_slice())
        .context("round-trip decompress")?;
    if n != block_len {
        bail!("recovered {n} bytes, expected {block_len}");
    }
    recovered.trim(n);
    if recovered != input {
        bail!("recovered bytes differ from the original block");
    }
    Ok(())
}

/// Stage 2: two blocks compressed separately and concatenated must decode
/// sequentially through the fast path, with each call consuming exactly its
/// block's compressed length and never writing past the requested output.
pub fn run_concatenation(codec: &dyn Codec, block_len: usize) -> anyhow::Result<()> {
    let first = ByteBuffer::random(block_len);
    let second = ByteBuffer::random(block_len);
    let first_compressed = compress_block(codec, &first).context("first block")?;
    let second_compressed = compress_block(codec, &second).context("second block")?;

    let stream = first_compressed.concat(&second_compressed);
    if stream.len() != first_compressed.len() + second_compressed.len() {
        bail!("concatenation length mismatch");
    }
    if !stream.prefix_eq(&first_compressed) {
        bail!("concatenation did not start with the first compressed block");
    }
    if &stream.as_slice()[first_compressed.len()..] != second_compressed.as_slice() {
        bail!("concatenation did not end with the second compressed block");
    }

    // Decode block 1 knowing only its original length; the canary sits just
    // past the logical output region.
    let mut guarded = ByteBuffer::new(block_len + 4);
    guarded.as_mut_slice()[block_len..].copy_from_slice(&CANARY.to_le_bytes());
    let (region, canary) = guarded.as_mut_slice().split_at_mut(block_len);

    let consumed = codec.decompress_fast(stream.as_slice(), region)?;
    if consumed != first_compressed.len() {
        bail!(
            "fast decode consumed {consumed} bytes, expected the first block's {}",
            first_compressed.len()
        );
    }
    if region != first.as_slice() {
        bail!("fast decode of the first block differs from the original");
    }
    if canary != CANARY.to_le_bytes() {
        bail!("fast decode wrote past the first output region");
    }

    // Decode block 2 starting at the boundary the first call reported.
    let mut guarded2 = ByteBuffer::new(block_len + 4);
    guarded2.as_mut_slice()[block_len..].copy_from_slice(&CANARY.to_le_bytes());
    let (region2, canary2) = guarded2.as_mut_slice().split_at_mut(block_len);

    let consumed2 = codec.decompress_fast(&stream.as_slice()[consumed..], region2)?;
    if consumed2 != second_compressed.len() {
        bail!(
            "fast decode consumed {consumed2} bytes, expected the second block's {}",
            second_compressed.len()
        );
    }
    if region2 != second.as_slice() {
        bail!("fast decode of the second block differs from the original");
    }
    if canary2 != CANARY.to_le_bytes() {
        bail!("fast decode wrote past the second output region");
    }
    // First region must still be intact after the second decode.
    if guarded.as_slice()[block_len..] != CANARY.to_le_bytes() {
        bail!("second decode clobbered the first block's canary");
    }
    Ok(())
}

/// Stage 3: latency sweep comparing the length-aware and length-less decode
/// paths across block sizes.
///
/// A backend without a fast path contributes length-aware rows only; that
/// is an expected shape, not a failure.
pub fn run_benchmark(
    codec: &dyn Codec,
    config: &HarnessConfig,
) -> anyhow::Result<Vec<BenchRow>> {
    if config.iterations == 0 {
        bail!("benchmark needs at least one iteration");
    }
    let mut rows = Vec::new();
    for &block_len in &config.bench_sizes {
        let input = ByteBuffer::random(block_len);
        let compressed = compress_block(codec, &input)
            .with_context(|| format!("benchmark compress, block_len={block_len}"))?;

        // Length-aware path: the codec discovers the output length itself.
        let mut out = ByteBuffer::new(block_len);
        let mut samples = LatencySamples::with_capacity(config.iterations);
        for _ in 0..config.iterations {
            let t = Instant::now();
            let n = codec.decompress(compressed.as_slice(), out.as_mut_slice())?;
            samples.record(t.elapsed());
            if n != block_len {
                bail!("benchmark decompress recovered {n} bytes, expected {block_len}");
            }
        }
        rows.push(BenchRow {
            block_len,
            strategy: DecodeStrategy::LengthAware,
            latency: samples.summarize().expect("iterations > 0"),
        });

        // Length-less path: caller supplies the exact original length.
        let mut samples = LatencySamples::with_capacity(config.iterations);
        let mut supported = true;
        for _ in 0..config.iterations {
            let t = Instant::now();
            match codec.decompress_fast(compressed.as_slice(), out.as_mut_slice()) {
                Ok(consumed) => {
                    samples.record(t.elapsed());
                    if consumed != compressed.len() {
                        bail!(
                            "benchmark fast decode consumed {consumed} of {} bytes",
                            compressed.len()
                        );
                    }
                }
                Err(CodecError::Unsupported(_)) => {
                    supported = false;
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }
        if supported {
            rows.push(BenchRow {
                block_len,
                strategy: DecodeStrategy::LengthLess,
                latency: samples.summarize().expect("iterations > 0"),
            });
        }
    }
    Ok(rows)
}
