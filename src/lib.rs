//! A double-array trie and a Viterbi lattice built on top of it.
//!
//! The trie side (`codec`, `storage`, `double_array`, `trie`) is a compact,
//! read-mostly associative container mapping variable-length byte keys to
//! opaque values, with exact lookup, prefix-restricted subtries, in-order
//! iteration, and an on-disk format usable either fully loaded into memory
//! or memory-mapped.
//!
//! The lattice side (`input`, `vocabulary`, `lattice`) builds a word graph
//! over a trie-backed vocabulary and enumerates the N best paths through it
//! under caller-supplied constraints.

mod bits;

/// Value (de)serialization as a pair of function objects, not a trait.
pub mod codec;
/// BASE/CHECK cell storage: in-memory, shared, and memory-mapped variants.
pub mod storage;
/// The double-array trie engine: build, find, subtrie, iterate.
pub mod double_array;
/// The generic key/value trie wrapping `double_array` + `storage`.
pub mod trie;

/// Heterogeneous lattice input (owned string or user-defined).
pub mod input;
/// Trie-backed vocabularies resolving an input span to candidate entries.
pub mod vocabulary;
/// Step-indexed word lattice, Viterbi settling, and N-best enumeration.
pub mod lattice;

pub use codec::ValueCodec;
pub use double_array::DoubleArray;
pub use input::{CustomInput, Input, StringInput};
pub use lattice::{Lattice, Node, NodeKind, Path};
pub use lattice::constraint::{Constraint, ConstraintElement, WildcardStep};
pub use lattice::n_best::NBestIterator;
pub use storage::Storage;
pub use trie::Trie;
pub use vocabulary::{CustomVocabulary, Entry, HashMapVocabulary, Vocabulary};
