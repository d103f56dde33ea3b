//! BASE/CHECK cell storage backing [`crate::double_array`].
//!
//! Three variants, all behind the single [`Storage`] handle: in-memory
//! (owned, cheaply `Clone`-able as a deep copy), shared (an `Rc<RefCell<_>>`
//! alias several handles mutate through), and mmap (read-only, backed by a
//! memory-mapped file with a bounded LRU cache over decoded value slots).
//!
//! The on-disk image is a single envelope regardless of value-record shape:
//! a cell table, then a value count, then a fixed-size marker (`0` for
//! variable-size records, otherwise the record width), then that many value
//! records. [`Storage::serialize`] writes the variable-size form;
//! [`Storage::serialize_fixed`] writes the fixed-size form required by
//! [`Storage::load_mmap`]. The value array's length is independent of the
//! cell count: cells are addressed by trie position, values by insertion
//! order, and the two only happen to coincide for a trie with one key per
//! bottom-level branch.
//!
//! Not covered: multi-threaded mutation, or writing back through the mmap
//! variant — both out of scope.

use byteorder::{BigEndian, ByteOrder};
use lru::LruCache;
use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::path::Path;
use std::rc::Rc;
use std::{error, fmt};

use crate::bits::Cursor;

const ABSENT_LENGTH: u32 = 0xFFFF_FFFF;
const DEFAULT_MMAP_CACHE_CAPACITY: usize = 10_000;

#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Malformed(&'static str),
    /// A value longer than the mmap variant's fixed slot size was written.
    ValueTooLarge { max: usize, actual: usize },
    /// `load_mmap` was asked for a value size that doesn't match the file.
    FixedSizeMismatch { expected: usize, found: usize },
    /// The caller passed an argument that can never be satisfied, distinct
    /// from a malformed image (e.g. mmap-loading a variable-size file).
    InvalidArgument(&'static str),
    /// A mutation was attempted against the read-only mmap backend.
    Unsupported(&'static str),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "storage I/O error: {e}"),
            Self::Malformed(msg) => write!(f, "malformed storage image: {msg}"),
            Self::ValueTooLarge { max, actual } => {
                write!(f, "value of {actual} bytes exceeds fixed slot size {max}")
            }
            Self::FixedSizeMismatch { expected, found } => write!(
                f,
                "mmap storage was built with value size {found}, expected {expected}"
            ),
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::Unsupported(msg) => write!(f, "unsupported operation: {msg}"),
        }
    }
}

impl error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<crate::bits::Error> for StorageError {
    fn from(_: crate::bits::Error) -> Self {
        Self::Malformed("truncated image")
    }
}

/// A packed BASE/CHECK cell: the top 24 bits hold a signed BASE, the bottom
/// 8 bits hold CHECK. `CHECK == 0xFF` marks a vacant cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell(u32);

impl Cell {
    pub const VACANT_CHECK: u8 = 0xFF;

    #[must_use]
    pub fn vacant() -> Self {
        Self::new(0, Self::VACANT_CHECK)
    }

    #[must_use]
    pub fn new(base: i32, check: u8) -> Self {
        let base_bits = (base as u32) & 0x00FF_FFFF;
        Self((base_bits << 8) | u32::from(check))
    }

    #[must_use]
    pub fn base(&self) -> i32 {
        let bits = (self.0 >> 8) & 0x00FF_FFFF;
        if bits & 0x0080_0000 != 0 {
            (bits | 0xFF00_0000) as i32
        } else {
            bits as i32
        }
    }

    #[must_use]
    pub fn check(&self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    #[must_use]
    pub fn is_vacant(&self) -> bool {
        self.check() == Self::VACANT_CHECK
    }

    #[must_use]
    fn to_bits(self) -> u32 {
        self.0
    }

    #[must_use]
    fn from_bits(bits: u32) -> Self {
        Self(bits)
    }
}

struct InMemoryData {
    cells: Vec<Cell>,
    values: Vec<Option<Vec<u8>>>,
}

impl Clone for InMemoryData {
    fn clone(&self) -> Self {
        Self {
            cells: self.cells.clone(),
            values: self.values.clone(),
        }
    }
}

struct MmapData {
    mmap: memmap2::Mmap,
    cell_count: usize,
    value_count: usize,
    value_size: usize,
    cache: RefCell<LruCache<usize, Option<Vec<u8>>>>,
}

impl MmapData {
    fn cells_offset(&self) -> usize {
        4
    }

    fn values_offset(&self) -> usize {
        self.cells_offset() + self.cell_count * 4 + 8
    }

    fn cell_at(&self, index: usize) -> Cell {
        let offset = self.cells_offset() + index * 4;
        Cell::from_bits(BigEndian::read_u32(&self.mmap[offset..offset + 4]))
    }

    fn value_slot(&self, index: usize) -> &[u8] {
        let offset = self.values_offset() + index * self.value_size;
        &self.mmap[offset..offset + self.value_size]
    }

    fn value_at(&self, index: usize) -> Option<Vec<u8>> {
        if let Some(cached) = self.cache.borrow_mut().get(&index) {
            return cached.clone();
        }
        let slot = self.value_slot(index);
        let value = if slot.iter().all(|&b| b == 0xFF) {
            None
        } else {
            Some(slot.to_vec())
        };
        self.cache.borrow_mut().put(index, value.clone());
        value
    }
}

enum Backend {
    InMemory(Rc<RefCell<InMemoryData>>),
    Shared(Rc<RefCell<InMemoryData>>),
    Mmap(Rc<MmapData>),
}

/// A handle onto BASE/CHECK cell storage plus an independently-sized value
/// array. Cheap to pass by value: `Clone` deep-copies the in-memory variant,
/// aliases the shared variant, and clones an `Rc` for the read-only mmap
/// variant.
pub struct Storage {
    backend: Backend,
}

impl Storage {
    /// A fresh, empty in-memory storage with `initial_size` vacant cells and
    /// no values yet.
    #[must_use]
    pub fn new_in_memory(initial_size: usize) -> Self {
        log::debug!("allocating in-memory storage with {initial_size} cells");
        let data = InMemoryData {
            cells: vec![Cell::vacant(); initial_size],
            values: Vec::new(),
        };
        Self {
            backend: Backend::InMemory(Rc::new(RefCell::new(data))),
        }
    }

    /// Turns this storage into the shared variant: clones of the returned
    /// handle (via `Clone`) all alias the same underlying cells.
    #[must_use]
    pub fn into_shared(self) -> Self {
        let data = match self.backend {
            Backend::InMemory(rc) | Backend::Shared(rc) => rc,
            Backend::Mmap(_) => return self,
        };
        Self {
            backend: Backend::Shared(data),
        }
    }

    /// An `Rc`-alias of this storage regardless of variant, used internally
    /// by subtrie construction, which must always share cells with its
    /// parent even when the parent is a plain in-memory storage.
    #[must_use]
    pub(crate) fn alias(&self) -> Self {
        let backend = match &self.backend {
            Backend::InMemory(rc) => Backend::InMemory(Rc::clone(rc)),
            Backend::Shared(rc) => Backend::Shared(Rc::clone(rc)),
            Backend::Mmap(rc) => Backend::Mmap(Rc::clone(rc)),
        };
        Self { backend }
    }

    #[must_use]
    pub fn base_check_size(&self) -> usize {
        match &self.backend {
            Backend::InMemory(rc) | Backend::Shared(rc) => rc.borrow().cells.len(),
            Backend::Mmap(rc) => rc.cell_count,
        }
    }

    /// Number of value slots, independent of `base_check_size()`: values are
    /// addressed by insertion order, cells by trie position.
    #[must_use]
    pub fn value_count(&self) -> usize {
        match &self.backend {
            Backend::InMemory(rc) | Backend::Shared(rc) => rc.borrow().values.len(),
            Backend::Mmap(rc) => rc.value_count,
        }
    }

    fn ensure_cells_size(data: &mut InMemoryData, index: usize) {
        if index >= data.cells.len() {
            data.cells.resize(index + 1, Cell::vacant());
        }
    }

    fn ensure_values_size(data: &mut InMemoryData, index: usize) {
        if index >= data.values.len() {
            data.values.resize(index + 1, None);
        }
    }

    #[must_use]
    pub fn base_at(&self, index: usize) -> i32 {
        match &self.backend {
            Backend::InMemory(rc) | Backend::Shared(rc) => rc
                .borrow()
                .cells
                .get(index)
                .copied()
                .unwrap_or_else(Cell::vacant)
                .base(),
            Backend::Mmap(rc) => {
                if index >= rc.cell_count {
                    Cell::vacant().base()
                } else {
                    rc.cell_at(index).base()
                }
            }
        }
    }

    #[must_use]
    pub fn check_at(&self, index: usize) -> u8 {
        match &self.backend {
            Backend::InMemory(rc) | Backend::Shared(rc) => rc
                .borrow()
                .cells
                .get(index)
                .copied()
                .unwrap_or_else(Cell::vacant)
                .check(),
            Backend::Mmap(rc) => {
                if index >= rc.cell_count {
                    Cell::VACANT_CHECK
                } else {
                    rc.cell_at(index).check()
                }
            }
        }
    }

    pub fn set_base_at(&self, index: usize, base: i32) -> Result<(), StorageError> {
        match &self.backend {
            Backend::InMemory(rc) | Backend::Shared(rc) => {
                let mut data = rc.borrow_mut();
                Self::ensure_cells_size(&mut data, index);
                let check = data.cells[index].check();
                data.cells[index] = Cell::new(base, check);
                Ok(())
            }
            Backend::Mmap(_) => Err(StorageError::Unsupported("cannot mutate mmap storage")),
        }
    }

    pub fn set_check_at(&self, index: usize, check: u8) -> Result<(), StorageError> {
        match &self.backend {
            Backend::InMemory(rc) | Backend::Shared(rc) => {
                let mut data = rc.borrow_mut();
                Self::ensure_cells_size(&mut data, index);
                let base = data.cells[index].base();
                data.cells[index] = Cell::new(base, check);
                Ok(())
            }
            Backend::Mmap(_) => Err(StorageError::Unsupported("cannot mutate mmap storage")),
        }
    }

    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<Vec<u8>> {
        match &self.backend {
            Backend::InMemory(rc) | Backend::Shared(rc) => {
                rc.borrow().values.get(index).cloned().flatten()
            }
            Backend::Mmap(rc) => {
                if index >= rc.value_count {
                    None
                } else {
                    rc.value_at(index)
                }
            }
        }
    }

    pub fn set_value_at(&self, index: usize, value: Option<Vec<u8>>) -> Result<(), StorageError> {
        match &self.backend {
            Backend::InMemory(rc) | Backend::Shared(rc) => {
                let mut data = rc.borrow_mut();
                Self::ensure_values_size(&mut data, index);
                data.values[index] = value;
                Ok(())
            }
            Backend::Mmap(_) => Err(StorageError::Unsupported("cannot mutate mmap storage")),
        }
    }

    /// Fraction of non-vacant cells, used by the builder to decide when to
    /// widen its density-factor scan.
    #[must_use]
    pub fn filling_rate(&self) -> f64 {
        let size = self.base_check_size();
        if size == 0 {
            return 1.0;
        }
        let filled = (0..size).filter(|&i| self.check_at(i) != Cell::VACANT_CHECK).count();
        filled as f64 / size as f64
    }

    #[must_use]
    pub fn is_mmap(&self) -> bool {
        matches!(self.backend, Backend::Mmap(_))
    }

    fn write_header<W: Write>(
        &self,
        writer: &mut W,
        value_count: usize,
        fixed_value_size: usize,
    ) -> Result<(), StorageError> {
        let cell_count = self.base_check_size();
        let mut header = [0u8; 4];
        BigEndian::write_u32(&mut header, cell_count as u32);
        writer.write_all(&header)?;
        for i in 0..cell_count {
            let mut buf = [0u8; 4];
            BigEndian::write_u32(&mut buf, Cell::new(self.base_at(i), self.check_at(i)).to_bits());
            writer.write_all(&buf)?;
        }
        let mut counts = [0u8; 8];
        BigEndian::write_u32(&mut counts[0..4], value_count as u32);
        BigEndian::write_u32(&mut counts[4..8], fixed_value_size as u32);
        writer.write_all(&counts)?;
        Ok(())
    }

    /// Serializes to the variable-value-size image [`Storage::load`] reads
    /// back: `[N][N cells][M][F=0]` followed by `M` length-prefixed value
    /// records (`0xFFFF_FFFF` length marks an absent value).
    pub fn serialize<W: Write>(&self, writer: &mut W) -> Result<(), StorageError> {
        let value_count = self.value_count();
        log::debug!(
            "serializing storage with {} cells, {value_count} values",
            self.base_check_size()
        );
        self.write_header(writer, value_count, 0)?;
        for i in 0..value_count {
            match self.value_at(i) {
                Some(bytes) => {
                    let mut len_buf = [0u8; 4];
                    BigEndian::write_u32(&mut len_buf, bytes.len() as u32);
                    writer.write_all(&len_buf)?;
                    writer.write_all(&bytes)?;
                }
                None => {
                    let mut len_buf = [0u8; 4];
                    BigEndian::write_u32(&mut len_buf, ABSENT_LENGTH);
                    writer.write_all(&len_buf)?;
                }
            }
        }
        Ok(())
    }

    /// Serializes to the fixed-value-size image [`Storage::load_mmap`]
    /// reads back: `[N][N cells][M][F>0]` followed by `M` fixed-width value
    /// records. Every present value must be exactly `value_size` bytes and
    /// must not consist entirely of `0xFF` bytes, which is reserved to mean
    /// "absent".
    pub fn serialize_fixed<W: Write>(
        &self,
        writer: &mut W,
        value_size: usize,
    ) -> Result<(), StorageError> {
        let value_count = self.value_count();
        log::debug!(
            "serializing fixed-value storage: {} cells, {value_count} values, value size {value_size}",
            self.base_check_size()
        );
        self.write_header(writer, value_count, value_size)?;
        for i in 0..value_count {
            match self.value_at(i) {
                Some(bytes) => {
                    if bytes.len() != value_size {
                        return Err(StorageError::ValueTooLarge {
                            max: value_size,
                            actual: bytes.len(),
                        });
                    }
                    writer.write_all(&bytes)?;
                }
                None => writer.write_all(&vec![0xFFu8; value_size])?,
            }
        }
        Ok(())
    }

    /// Loads an image written by [`Storage::serialize`] or
    /// [`Storage::serialize_fixed`] into a fresh in-memory storage,
    /// regardless of which record shape it was written with.
    pub fn load(bytes: &[u8]) -> Result<Self, StorageError> {
        let mut cursor = Cursor::new(bytes);
        let cell_count = cursor.read_u32()? as usize;
        let mut cells = Vec::with_capacity(cell_count);
        for _ in 0..cell_count {
            cells.push(Cell::from_bits(cursor.read_u32()?));
        }
        let value_count = cursor.read_u32()? as usize;
        let fixed_value_size = cursor.read_u32()? as usize;
        let mut values = Vec::with_capacity(value_count);
        if fixed_value_size == 0 {
            for _ in 0..value_count {
                let len = cursor.read_u32()?;
                if len == ABSENT_LENGTH {
                    values.push(None);
                } else {
                    values.push(Some(cursor.read_bytes(len as usize)?.to_vec()));
                }
            }
        } else {
            for _ in 0..value_count {
                let slot = cursor.read_bytes(fixed_value_size)?;
                if slot.iter().all(|&b| b == 0xFF) {
                    values.push(None);
                } else {
                    values.push(Some(slot.to_vec()));
                }
            }
        }
        Ok(Self {
            backend: Backend::InMemory(Rc::new(RefCell::new(InMemoryData { cells, values }))),
        })
    }

    /// Memory-maps `path`, validating it was serialized with
    /// `value_size`-byte fixed value slots. The invalid-argument boundary
    /// case arises here: a variable-size (`F == 0`) image is rejected, as is
    /// a mismatched `value_size`, rather than silently misreading the image.
    pub fn load_mmap(path: &Path, value_size: usize) -> Result<Self, StorageError> {
        log::debug!("mapping {} with value size {value_size}", path.display());
        let file = File::open(path)?;
        let mmap = unsafe { memmap2::Mmap::map(&file)? };
        if mmap.len() < 4 {
            return Err(StorageError::Malformed("file shorter than header"));
        }
        let cell_count = BigEndian::read_u32(&mmap[0..4]) as usize;
        let counts_offset = 4 + cell_count * 4;
        if mmap.len() < counts_offset + 8 {
            return Err(StorageError::Malformed("file shorter than header"));
        }
        let value_count = BigEndian::read_u32(&mmap[counts_offset..counts_offset + 4]) as usize;
        let found_value_size =
            BigEndian::read_u32(&mmap[counts_offset + 4..counts_offset + 8]) as usize;
        if found_value_size == 0 {
            return Err(StorageError::InvalidArgument(
                "file holds variable-size records; mmap requires a fixed size",
            ));
        }
        if found_value_size != value_size {
            return Err(StorageError::FixedSizeMismatch {
                expected: value_size,
                found: found_value_size,
            });
        }
        let expected_len = counts_offset + 8 + value_count * value_size;
        if mmap.len() != expected_len {
            return Err(StorageError::Malformed("file length doesn't match header"));
        }
        let cache = LruCache::new(
            NonZeroUsize::new(DEFAULT_MMAP_CACHE_CAPACITY).expect("nonzero capacity"),
        );
        Ok(Self {
            backend: Backend::Mmap(Rc::new(MmapData {
                mmap,
                cell_count,
                value_count,
                value_size,
                cache: RefCell::new(cache),
            })),
        })
    }

    /// Same as [`Storage::load_mmap`] but with an explicit cache capacity,
    /// for callers that know their working-set size up front.
    pub fn load_mmap_with_cache_capacity(
        path: &Path,
        value_size: usize,
        capacity: usize,
    ) -> Result<Self, StorageError> {
        let mut storage = Self::load_mmap(path, value_size)?;
        if let Backend::Mmap(rc) = &mut storage.backend {
            let capacity = NonZeroUsize::new(capacity).unwrap_or(
                NonZeroUsize::new(DEFAULT_MMAP_CACHE_CAPACITY).expect("nonzero capacity"),
            );
            *rc.cache.borrow_mut() = LruCache::new(capacity);
        }
        Ok(storage)
    }
}

impl Clone for Storage {
    /// Deep-copies the in-memory variant; aliases the shared and mmap
    /// variants, for which independent mutable copies either don't apply
    /// (mmap is read-only) or would defeat the point (shared is meant to be
    /// aliased).
    fn clone(&self) -> Self {
        let backend = match &self.backend {
            Backend::InMemory(rc) => {
                Backend::InMemory(Rc::new(RefCell::new(rc.borrow().clone())))
            }
            Backend::Shared(rc) => Backend::Shared(Rc::clone(rc)),
            Backend::Mmap(rc) => Backend::Mmap(Rc::clone(rc)),
        };
        Self { backend }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_packs_negative_base() {
        let cell = Cell::new(-1, 5);
        assert_eq!(-1, cell.base());
        assert_eq!(5, cell.check());
    }

    #[test]
    fn vacant_cell_has_sentinel_check() {
        assert!(Cell::vacant().is_vacant());
        assert!(!Cell::new(0, 0).is_vacant());
    }

    #[test]
    fn set_and_read_cells_grows_storage() {
        let storage = Storage::new_in_memory(0);
        storage.set_base_at(3, 42).unwrap();
        storage.set_check_at(3, 7).unwrap();
        assert_eq!(42, storage.base_at(3));
        assert_eq!(7, storage.check_at(3));
        assert_eq!(4, storage.base_check_size());
    }

    #[test]
    fn values_grow_independently_of_cells() {
        let storage = Storage::new_in_memory(1);
        storage.set_value_at(5, Some(vec![9])).unwrap();
        assert_eq!(1, storage.base_check_size());
        assert_eq!(6, storage.value_count());
    }

    #[test]
    fn clone_of_in_memory_is_independent() {
        let storage = Storage::new_in_memory(1);
        storage.set_base_at(0, 1).unwrap();
        let cloned = storage.clone();
        cloned.set_base_at(0, 2).unwrap();
        assert_eq!(1, storage.base_at(0));
        assert_eq!(2, cloned.base_at(0));
    }

    #[test]
    fn shared_storage_aliases_mutations() {
        let storage = Storage::new_in_memory(1).into_shared();
        let cloned = storage.clone();
        cloned.set_base_at(0, 9).unwrap();
        assert_eq!(9, storage.base_at(0));
    }

    #[test]
    fn alias_always_shares_even_for_in_memory() {
        let storage = Storage::new_in_memory(1);
        let aliased = storage.alias();
        aliased.set_base_at(0, 9).unwrap();
        assert_eq!(9, storage.base_at(0));
    }

    #[test]
    fn variable_size_round_trip() {
        let storage = Storage::new_in_memory(2);
        storage.set_value_at(0, Some(vec![1, 2, 3])).unwrap();
        storage.set_value_at(1, None).unwrap();
        let mut bytes = Vec::new();
        storage.serialize(&mut bytes).unwrap();
        let loaded = Storage::load(&bytes).unwrap();
        assert_eq!(Some(vec![1, 2, 3]), loaded.value_at(0));
        assert_eq!(None, loaded.value_at(1));
        assert_eq!(2, loaded.value_count());
    }

    #[test]
    fn mmap_round_trip() {
        let storage = Storage::new_in_memory(2);
        storage.set_base_at(0, 5).unwrap();
        storage.set_check_at(0, 1).unwrap();
        storage
            .set_value_at(0, Some(vec![0xAA, 0xBB, 0xCC, 0xDD]))
            .unwrap();
        storage.set_value_at(1, None).unwrap();
        let mut bytes = Vec::new();
        storage.serialize_fixed(&mut bytes, 4).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trie.bin");
        std::fs::write(&path, &bytes).unwrap();

        let loaded = Storage::load_mmap(&path, 4).unwrap();
        assert!(loaded.is_mmap());
        assert_eq!(5, loaded.base_at(0));
        assert_eq!(1, loaded.check_at(0));
        assert_eq!(2, loaded.value_count());
        assert_eq!(Some(vec![0xAA, 0xBB, 0xCC, 0xDD]), loaded.value_at(0));
        assert_eq!(None, loaded.value_at(1));
    }

    #[test]
    fn mmap_rejects_mismatched_value_size() {
        let storage = Storage::new_in_memory(1);
        let mut bytes = Vec::new();
        storage.serialize_fixed(&mut bytes, 4).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trie.bin");
        std::fs::write(&path, &bytes).unwrap();

        let err = Storage::load_mmap(&path, 8).unwrap_err();
        assert!(matches!(err, StorageError::FixedSizeMismatch { .. }));
    }

    #[test]
    fn mmap_rejects_variable_size_image() {
        let storage = Storage::new_in_memory(1);
        storage.set_value_at(0, Some(vec![1, 2, 3])).unwrap();
        let mut bytes = Vec::new();
        storage.serialize(&mut bytes).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trie.bin");
        std::fs::write(&path, &bytes).unwrap();

        let err = Storage::load_mmap(&path, 3).unwrap_err();
        assert!(matches!(err, StorageError::InvalidArgument(_)));
    }

    #[test]
    fn mmap_mutation_surfaces_as_error_not_panic() {
        let storage = Storage::new_in_memory(1);
        let mut bytes = Vec::new();
        storage.serialize_fixed(&mut bytes, 4).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trie.bin");
        std::fs::write(&path, &bytes).unwrap();

        let loaded = Storage::load_mmap(&path, 4).unwrap();
        assert!(matches!(
            loaded.set_base_at(0, 1),
            Err(StorageError::Unsupported(_))
        ));
        assert!(matches!(
            loaded.set_check_at(0, 1),
            Err(StorageError::Unsupported(_))
        ));
        assert!(matches!(
            loaded.set_value_at(0, None),
            Err(StorageError::Unsupported(_))
        ));
    }
}
