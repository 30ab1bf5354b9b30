use thiserror::Error;

/// Errors raised by codec backends and the registry.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Output buffer too small, or the backend's compressor reported an
    /// internal error.
    #[error("compression failed: {0}")]
    Compression(String),

    /// Corrupt or truncated input, or insufficient output capacity.
    #[error("decompression failed: {0}")]
    Decompression(String),

    /// The backend has no length-less fast-decode mode. Expected for
    /// fixed-block codecs; reported distinctly from corruption.
    #[error("{0}: fast decode not supported")]
    Unsupported(&'static str),

    /// Identifier not recognized by the registry.
    #[error("unknown codec '{0}'")]
    UnknownCodec(String),
}

pub type Result<T> = std::result::Result<T, CodecError>;

/// Core compression abstraction driven by the harness.
///
/// Each backend:
/// - Is stateless across calls: every operation is a pure function of its
///   arguments (a backend may still allocate transient scratch per call),
///   so one instance serves arbitrarily many operations.
/// - Translates its native error and size conventions into [`CodecError`]
///   and byte counts.
/// - Must never write past the `output` slice it is handed.
pub trait Codec: Send + Sync {
    /// Diagnostic identifier for reports.
    fn name(&self) -> &'static str;

    /// Worst-case compressed size for an input of `input_len` bytes.
    ///
    /// An output buffer of this size is always sufficient for
    /// [`compress`](Codec::compress) on any input of that length.
    fn max_compressed_len(&self, input_len: usize) -> usize;

    /// Compress `input` into `output`, returning the bytes written.
    fn compress(&self, input: &[u8], output: &mut [u8]) -> Result<usize>;

    /// Length-aware decode of a single compressed block.
    ///
    /// `input` must hold exactly one block; `output` must be at least the
    /// original uncompressed size and may be larger. Returns the bytes
    /// written (the original size).
    fn decompress(&self, input: &[u8], output: &mut [u8]) -> Result<usize>;

    /// Length-less decode of one block out of a possibly larger stream.
    ///
    /// `input` may contain further compressed blocks back-to-back after the
    /// first; the only boundary information is the original size of the
    /// first block, carried by `output.len()`. Writes exactly
    /// `output.len()` bytes and returns how many bytes of `input` were
    /// consumed to produce them, which is the offset of the next block.
    ///
    /// Backends without a partial-decode mode return
    /// [`CodecError::Unsupported`] rather than guessing.
    fn decompress_fast(&self, input: &[u8], output: &mut [u8]) -> Result<usize>;
}
