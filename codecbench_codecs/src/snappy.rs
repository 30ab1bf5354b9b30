use codecbench_core::{Codec, CodecError, Result};

/// Snappy raw-block codec.
///
/// Snappy frames every block with its own length header and has no
/// incremental decode mode, so the length-less fast path is categorically
/// unsupported — the backend refuses rather than risking a mis-decode of a
/// concatenated stream.
pub struct SnappyCodec;

impl Codec for SnappyCodec {
    fn name(&self) -> &'static str {
        "snappy"
    }

    fn max_compressed_len(&self, input_len: usize) -> usize {
        snap::raw::max_compress_len(input_len)
    }

    fn compress(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        snap::raw::Encoder::new()
            .compress(input, output)
            .map_err(|e| CodecError::Compression(format!("snappy: {e}")))
    }

    fn decompress(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        snap::raw::Decoder::new()
            .decompress(input, output)
            .map_err(|e| CodecError::Decompression(format!("snappy: {e}")))
    }

    fn decompress_fast(&self, _input: &[u8], _output: &mut [u8]) -> Result<usize> {
        Err(CodecError::Unsupported("snappy"))
    }
}
