//! Value codecs: a pair of function objects, not a trait.
//!
//! A [`ValueCodec`] holds a serializer and a deserializer as plain closures
//! so that callers can build one inline without naming a type, the same way
//! [`crate::double_array`]'s build observers are closures rather than a
//! trait with overridable hooks.

use byteorder::{BigEndian, ByteOrder};
use std::{error, fmt};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// The byte slice handed to `deserialize` didn't have the length this
    /// codec expects.
    WrongSize { expected: usize, actual: usize },
    /// The bytes were the right size but not a valid encoding.
    Malformed,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongSize { expected, actual } => {
                write!(f, "expected {expected} bytes, got {actual}")
            }
            Self::Malformed => f.write_str("malformed value bytes"),
        }
    }
}

impl error::Error for CodecError {}

/// Converts values of type `T` to and from the raw bytes [`crate::storage`]
/// stores. `fixed_size`, when set, lets [`crate::storage::Storage`] reject
/// mmap construction against a codec whose encoding isn't a constant width.
#[derive(Clone)]
pub struct ValueCodec<T> {
    serialize: Rc<dyn Fn(&T) -> Vec<u8>>,
    deserialize: Rc<dyn Fn(&[u8]) -> Result<T, CodecError>>,
    fixed_size: Option<usize>,
}

impl<T> ValueCodec<T> {
    pub fn new(
        serialize: impl Fn(&T) -> Vec<u8> + 'static,
        deserialize: impl Fn(&[u8]) -> Result<T, CodecError> + 'static,
    ) -> Self {
        Self {
            serialize: Rc::new(serialize),
            deserialize: Rc::new(deserialize),
            fixed_size: None,
        }
    }

    #[must_use]
    pub fn with_fixed_size(mut self, size: usize) -> Self {
        self.fixed_size = Some(size);
        self
    }

    #[must_use]
    pub fn fixed_size(&self) -> Option<usize> {
        self.fixed_size
    }

    #[must_use]
    pub fn serialize(&self, value: &T) -> Vec<u8> {
        (self.serialize)(value)
    }

    pub fn deserialize(&self, bytes: &[u8]) -> Result<T, CodecError> {
        (self.deserialize)(bytes)
    }
}

/// A fixed-size, big-endian `u32` codec, the shape the mmap round-trip
/// scenario needs.
#[must_use]
pub fn u32_codec() -> ValueCodec<u32> {
    ValueCodec::new(
        |v: &u32| {
            let mut buf = [0u8; 4];
            BigEndian::write_u32(&mut buf, *v);
            buf.to_vec()
        },
        |bytes: &[u8]| {
            if bytes.len() != 4 {
                return Err(CodecError::WrongSize {
                    expected: 4,
                    actual: bytes.len(),
                });
            }
            Ok(BigEndian::read_u32(bytes))
        },
    )
    .with_fixed_size(4)
}

/// A variable-size byte-string codec: the value is stored verbatim, with no
/// length prefix needed since [`crate::storage::Storage`] already tracks
/// each slot's length.
#[must_use]
pub fn bytes_codec() -> ValueCodec<Vec<u8>> {
    ValueCodec::new(
        |v: &Vec<u8>| v.clone(),
        |bytes: &[u8]| Ok(bytes.to_vec()),
    )
}
