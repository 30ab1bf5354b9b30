use codecbench_core::{Codec, CodecError, Result};
use lz4_flex::block::{compress_into, decompress_into, get_maximum_output_size};

/// LZ4 block codec.
///
/// Fastest backend of the three; the interesting part is the fast path:
/// `lz4_flex` only decodes whole inputs, so [`decompress_fast`] walks the
/// LZ4 block sequence stream itself, stopping once exactly the requested
/// number of bytes has been produced and reporting how much input that block
/// occupied. An LZ4 block always ends with a literals-only sequence, so
/// reaching the requested output length coincides with the block boundary.
///
/// [`decompress_fast`]: Codec::decompress_fast
pub struct Lz4Codec;

impl Codec for Lz4Codec {
    fn name(&self) -> &'static str {
        "lz4"
    }

    fn max_compressed_len(&self, input_len: usize) -> usize {
        get_maximum_output_size(input_len)
    }

    fn compress(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        compress_into(input, output)
            .map_err(|e| CodecError::Compression(format!("lz4: {e}")))
    }

    fn decompress(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        decompress_into(input, output)
            .map_err(|e| CodecError::Decompression(format!("lz4: {e}")))
    }

    fn decompress_fast(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        decompress_bounded(input, output)
    }
}

const MIN_MATCH: usize = 4;

fn corrupt(msg: &str) -> CodecError {
    CodecError::Decompression(format!("lz4: {msg}"))
}

/// Decode one LZ4 block out of `input`, which may contain further blocks
/// back-to-back, producing exactly `output.len()` bytes. Returns the number
/// of input bytes the block occupied.
///
/// Block format: each sequence is a token byte (literal run length in the
/// high nibble, match length in the low nibble, 15 meaning "extended by
/// following bytes"), the literal bytes, then — except in the final
/// sequence — a two-byte little-endian match offset and optional match
/// length extension. The final sequence carries literals only.
fn decompress_bounded(input: &[u8], output: &mut [u8]) -> Result<usize> {
    let want = output.len();
    let mut ip = 0usize;
    let mut op = 0usize;

    loop {
        let token = *input
            .get(ip)
            .ok_or_else(|| corrupt("truncated input: missing token"))?;
        ip += 1;

        // Literal run.
        let mut lit = (token >> 4) as usize;
        if lit == 0x0F {
            lit += read_len_extension(input, &mut ip)?;
        }
        if lit > 0 {
            let end = ip
                .checked_add(lit)
                .filter(|&e| e <= input.len())
                .ok_or_else(|| corrupt("literal run past end of input"))?;
            if op + lit > want {
                return Err(corrupt("block decodes past the requested length"));
            }
            output[op..op + lit].copy_from_slice(&input[ip..end]);
            ip = end;
            op += lit;
        }
        if op == want {
            // Literals-only final sequence: the block ends here.
            return Ok(ip);
        }

        // Match: two-byte offset back into the output produced so far.
        if ip + 2 > input.len() {
            return Err(corrupt("truncated input: missing match offset"));
        }
        let offset = u16::from_le_bytes([input[ip], input[ip + 1]]) as usize;
        ip += 2;
        if offset == 0 || offset > op {
            return Err(corrupt("match offset outside decoded output"));
        }
        let mut mlen = (token & 0x0F) as usize;
        if mlen == 0x0F {
            mlen += read_len_extension(input, &mut ip)?;
        }
        mlen += MIN_MATCH;
        if op + mlen > want {
            return Err(corrupt("match run past the requested length"));
        }
        // Byte-at-a-time copy: matches may overlap their own output
        // (offset < length replicates a repeating pattern).
        let mut src = op - offset;
        for _ in 0..mlen {
            output[op] = output[src];
            op += 1;
            src += 1;
        }
        if op == want {
            return Ok(ip);
        }
    }
}

/// Read the 255-terminated run-length extension bytes following a nibble
/// value of 15.
fn read_len_extension(input: &[u8], ip: &mut usize) -> Result<usize> {
    let mut total = 0usize;
    loop {
        let b = *input
            .get(*ip)
            .ok_or_else(|| corrupt("truncated input: missing length byte"))?;
        *ip += 1;
        total += b as usize;
        if b != 0xFF {
            return Ok(total);
        }
    }
}
