use codecbench_core::{Codec, CodecError, Result};
use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};

/// zlib/deflate codec.
///
/// Each call runs a fresh single-shot deflate/inflate with `Finish`; a
/// stream that does not reach `StreamEnd` within the supplied output means
/// the capacity was insufficient (or the input was corrupt) and is reported
/// as an error, never retried incrementally.
///
/// Both decode paths run the same inflate primitive. The length-aware path
/// tolerates surplus output capacity; the fast path sizes the output to the
/// known original length, requires the produced count to match it exactly,
/// and reports the input bytes the block occupied — inflate stops at the
/// deflate stream's own end marker, which is what makes the boundary
/// recoverable from a concatenated buffer.
pub struct DeflateCodec {
    /// Compression level (0 = store, 9 = best).
    pub level: u32,
}

impl Default for DeflateCodec {
    fn default() -> Self {
        Self { level: 6 }
    }
}

impl DeflateCodec {
    pub fn new(level: u32) -> Self {
        Self { level }
    }
}

impl Codec for DeflateCodec {
    fn name(&self) -> &'static str {
        "deflate"
    }

    fn max_compressed_len(&self, input_len: usize) -> usize {
        // deflateBound() arithmetic for the default settings, plus the
        // 6-byte zlib wrapper; flate2 does not re-export the bound.
        input_len + (input_len >> 12) + (input_len >> 14) + (input_len >> 25) + 13 + 6
    }

    fn compress(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        let mut enc = Compress::new(Compression::new(self.level), true);
        match enc.compress(input, output, FlushCompress::Finish) {
            Ok(Status::StreamEnd) => Ok(enc.total_out() as usize),
            Ok(_) => Err(CodecError::Compression(
                "deflate: output buffer too small".into(),
            )),
            Err(e) => Err(CodecError::Compression(format!("deflate: {e}"))),
        }
    }

    fn decompress(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        let mut dec = Decompress::new(true);
        match dec.decompress(input, output, FlushDecompress::Finish) {
            Ok(Status::StreamEnd) => Ok(dec.total_out() as usize),
            Ok(_) => Err(CodecError::Decompression(
                "deflate: stream did not end within output capacity".into(),
            )),
            Err(e) => Err(CodecError::Decompression(format!("deflate: {e}"))),
        }
    }

    fn decompress_fast(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        let mut dec = Decompress::new(true);
        match dec.decompress(input, output, FlushDecompress::Finish) {
            Ok(Status::StreamEnd) => {
                if dec.total_out() as usize != output.len() {
                    return Err(CodecError::Decompression(format!(
                        "deflate: block produced {} bytes, expected {}",
                        dec.total_out(),
                        output.len()
                    )));
                }
                Ok(dec.total_in() as usize)
            }
            Ok(_) => Err(CodecError::Decompression(
                "deflate: block larger than its recorded original size".into(),
            )),
            Err(e) => Err(CodecError::Decompression(format!("deflate: {e}"))),
        }
    }
}
