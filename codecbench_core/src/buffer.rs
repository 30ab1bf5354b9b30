use rand::RngCore;

/// Owned span of bytes with a logical length that can be trimmed below the
/// allocated capacity.
///
/// This is the unit of data every harness stage works with: blocks are
/// generated, compressed into, trimmed to the produced size, concatenated,
/// and compared as `ByteBuffer`s. Storage is never shared — copying is a
/// deep copy of the logical region, and [`take`](ByteBuffer::take) moves the
/// storage out while leaving the source valid and empty.
#[derive(Debug, Default)]
pub struct ByteBuffer {
    data: Box<[u8]>,
    len: usize,
}

impl ByteBuffer {
    /// Zero-filled buffer; logical length equals capacity.
    pub fn new(len: usize) -> Self {
        Self {
            data: vec![0u8; len].into_boxed_slice(),
            len,
        }
    }

    /// Take ownership of an existing allocation. The buffer's logical length
    /// is the vector's length.
    pub fn from_vec(v: Vec<u8>) -> Self {
        let len = v.len();
        Self {
            data: v.into_boxed_slice(),
            len,
        }
    }

    /// Buffer of `len` pseudo-random bytes from the process RNG.
    ///
    /// The RNG is seeded once per thread by the OS; two buffers requested
    /// back-to-back are independent.
    pub fn random(len: usize) -> Self {
        let mut data = vec![0u8; len];
        rand::thread_rng().fill_bytes(&mut data);
        Self::from_vec(data)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated capacity; `trim` shrinks `len` but never releases capacity.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data[..self.len]
    }

    /// Shrink the logical length to `new_len`.
    ///
    /// # Panics
    /// If `new_len` exceeds the current logical length. Growing through
    /// `trim` would expose bytes the caller never wrote.
    pub fn trim(&mut self, new_len: usize) {
        assert!(
            new_len <= self.len,
            "trim({new_len}) would grow buffer of length {}",
            self.len
        );
        self.len = new_len;
    }

    /// Move the contents out, leaving `self` empty (length 0, no storage).
    pub fn take(&mut self) -> ByteBuffer {
        std::mem::take(self)
    }

    /// New owned buffer holding self's logical bytes followed by `other`'s.
    pub fn concat(&self, other: &ByteBuffer) -> ByteBuffer {
        let mut v = Vec::with_capacity(self.len + other.len);
        v.extend_from_slice(self.as_slice());
        v.extend_from_slice(other.as_slice());
        Self::from_vec(v)
    }

    /// Partial equality: compares only the first `min(self.len, other.len)`
    /// bytes. A truncated buffer therefore compares equal to any longer
    /// buffer sharing its prefix — callers wanting true equality should trim
    /// both sides to the intended length and use `==` instead.
    pub fn prefix_eq(&self, other: &ByteBuffer) -> bool {
        let n = self.len.min(other.len);
        self.data[..n] == other.data[..n]
    }
}

/// True equality: same logical length and same bytes.
impl PartialEq for ByteBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for ByteBuffer {}

impl Clone for ByteBuffer {
    /// Deep copy of the logical region only; trimmed-away capacity is not
    /// carried over.
    fn clone(&self) -> Self {
        Self::from_vec(self.as_slice().to_vec())
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}
