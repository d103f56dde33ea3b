//! Generic key/value trie: binds a key serializer and a
//! [`crate::codec::ValueCodec`] over a [`DoubleArray`].

use std::path::Path;

use crate::codec::{CodecError, ValueCodec};
use crate::double_array::{BuildError, DoubleArray};
use crate::storage::{Storage, StorageError};
use std::{error, fmt};

#[derive(Debug)]
pub enum TrieError {
    Build(BuildError),
    Storage(StorageError),
    Codec(CodecError),
}

impl fmt::Display for TrieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Build(e) => write!(f, "{e}"),
            Self::Storage(e) => write!(f, "{e}"),
            Self::Codec(e) => write!(f, "{e}"),
        }
    }
}

impl error::Error for TrieError {}

impl From<BuildError> for TrieError {
    fn from(e: BuildError) -> Self {
        Self::Build(e)
    }
}

impl From<StorageError> for TrieError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<CodecError> for TrieError {
    fn from(e: CodecError) -> Self {
        Self::Codec(e)
    }
}

/// A trie mapping keys of type `K` (serialized to bytes by `key_bytes`) to
/// values of type `V` (serialized by `codec`).
pub struct Trie<K, V> {
    double_array: DoubleArray,
    codec: ValueCodec<V>,
    key_bytes: Box<dyn Fn(&K) -> Vec<u8>>,
}

impl<K, V> Trie<K, V> {
    /// Builds a fresh trie from `entries`, keyed by whatever `key_bytes`
    /// maps each `K` to.
    pub fn build(
        entries: &[(K, V)],
        key_bytes: impl Fn(&K) -> Vec<u8> + 'static,
        codec: ValueCodec<V>,
        density_factor: usize,
    ) -> Result<Self, TrieError> {
        let raw: Vec<(Vec<u8>, Vec<u8>)> = entries
            .iter()
            .map(|(k, v)| (key_bytes(k), codec.serialize(v)))
            .collect();
        let double_array = DoubleArray::build(&raw, density_factor, |_| {}, || {})?;
        Ok(Self {
            double_array,
            codec,
            key_bytes: Box::new(key_bytes),
        })
    }

    /// Wraps a [`DoubleArray`] already built or loaded from storage (the
    /// mmap-load path is exactly this: load the storage, then wrap it).
    pub fn from_double_array(
        double_array: DoubleArray,
        key_bytes: impl Fn(&K) -> Vec<u8> + 'static,
        codec: ValueCodec<V>,
    ) -> Self {
        Self {
            double_array,
            codec,
            key_bytes: Box::new(key_bytes),
        }
    }

    pub fn find(&self, key: &K) -> Result<Option<V>, TrieError> {
        let bytes = (self.key_bytes)(key);
        match self.double_array.find(&bytes) {
            Some(raw) => Ok(Some(self.codec.deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.double_array.contains(&(self.key_bytes)(key))
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        self.double_array.storage()
    }
}

impl<V: 'static> Trie<Vec<u8>, V> {
    /// Memory-maps an on-disk image built with
    /// [`crate::storage::Storage::serialize_fixed`] and wraps it as a
    /// byte-keyed trie.
    pub fn load_mmap(
        path: &Path,
        value_size: usize,
        codec: ValueCodec<V>,
    ) -> Result<Self, TrieError> {
        let storage = Storage::load_mmap(path, value_size)?;
        let double_array = DoubleArray::from_storage(storage);
        Ok(Self::from_double_array(double_array, |k: &Vec<u8>| k.clone(), codec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::bytes_codec;

    #[test]
    fn string_keyed_trie_round_trips() {
        let entries = vec![
            ("cat".to_string(), b"meow".to_vec()),
            ("dog".to_string(), b"woof".to_vec()),
        ];
        let trie = Trie::build(&entries, |k: &String| k.as_bytes().to_vec(), bytes_codec(), 16)
            .unwrap();
        assert_eq!(Some(b"meow".to_vec()), trie.find(&"cat".to_string()).unwrap());
        assert_eq!(None, trie.find(&"bird".to_string()).unwrap());
    }
}
