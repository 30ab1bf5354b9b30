mod deflate;
mod lz4;
mod snappy;

pub use deflate::DeflateCodec;
pub use lz4::Lz4Codec;
pub use snappy::SnappyCodec;

use codecbench_core::{Codec, CodecError};

/// Identifiers accepted by [`codec_by_name`], in the order the harness
/// sweeps them by default.
pub const ALL_CODECS: &[&str] = &["lz4", "deflate", "snappy"];

/// Resolve a codec from its identifier.
///
/// Returns a freshly constructed backend per call; instances are stateless
/// and never pooled. The `none` identifier is reserved but deliberately
/// unimplemented, so it fails like any other unknown name.
pub fn codec_by_name(name: &str) -> Result<Box<dyn Codec>, CodecError> {
    match name {
        "lz4" | "l" => Ok(Box::new(Lz4Codec)),
        "deflate" | "d" => Ok(Box::new(DeflateCodec::default())),
        "snappy" | "s" => Ok(Box::new(SnappyCodec)),
        other => Err(CodecError::UnknownCodec(other.to_string())),
    }
}
