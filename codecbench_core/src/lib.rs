pub mod buffer;
pub mod codec;
pub mod stats;

pub use buffer::ByteBuffer;
pub use codec::{Codec, CodecError, Result};
pub use stats::{LatencySamples, LatencySummary};
