//! Vocabularies: resolve an [`Input`] span to candidate [`Entry`] values and
//! report the connection cost between two entries.

use std::any::Any;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::input::Input;

/// Returned by [`Vocabulary::find_connection`] when no connection was ever
/// registered between the two entries. Still a valid (if prohibitively
/// expensive) edge — callers that want to treat it as absent do so
/// themselves, the lattice doesn't filter it out.
pub const CONNECTION_SENTINEL: i32 = i32::MAX;

/// A candidate word: the input span it covers, an opaque value payload, and
/// the cost of using this entry on its own (excluding any transition cost
/// to a neighboring entry).
#[derive(Clone)]
pub struct Entry {
    key: Option<Box<dyn Input>>,
    value: Rc<dyn Any>,
    cost: i32,
}

impl Entry {
    pub fn new(key: Box<dyn Input>, value: Rc<dyn Any>, cost: i32) -> Self {
        Self {
            key: Some(key),
            value,
            cost,
        }
    }

    /// The shared placeholder entry representing the beginning/end of
    /// sequence boundary, the way BOS and EOS share a single node kind in
    /// [`crate::lattice::Node`].
    #[must_use]
    pub fn bos_eos() -> Self {
        Self {
            key: None,
            value: Rc::new(()),
            cost: 0,
        }
    }

    #[must_use]
    pub fn key(&self) -> Option<&dyn Input> {
        self.key.as_deref()
    }

    #[must_use]
    pub fn value(&self) -> &Rc<dyn Any> {
        &self.value
    }

    #[must_use]
    pub fn cost(&self) -> i32 {
        self.cost
    }

    #[must_use]
    pub fn is_bos_eos(&self) -> bool {
        self.key.is_none()
    }

    fn key_equals(&self, other: &Self) -> bool {
        match (&self.key, &other.key) {
            (Some(a), Some(b)) => a.equals(b.as_ref()),
            (None, None) => true,
            _ => false,
        }
    }

    /// Identity used when resolving connection-map hash collisions: same
    /// key span and same cost. Value payloads aren't compared — two
    /// homophone entries with identical key and cost are interchangeable
    /// for connection-cost lookup purposes.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.key_equals(other) && self.cost == other.cost
    }

    #[must_use]
    pub fn hash_value(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        match &self.key {
            Some(k) => k.hash_value().hash(&mut hasher),
            None => 0u64.hash(&mut hasher),
        }
        self.cost.hash(&mut hasher);
        hasher.finish()
    }
}

/// Resolves lattice input spans to candidate entries and reports the cost
/// of transitioning from one entry to another.
pub trait Vocabulary {
    fn find_entries(&self, key: &dyn Input) -> Vec<Entry>;
    fn find_connection(&self, from: &Entry, to: &Entry) -> i32;
}

/// A vocabulary backed by a `String -> [Entry]` map and a connection-cost
/// map keyed by `hash(from) ^ hash(to)`, resolving collisions with
/// [`Entry::matches`] — the same bucket-plus-linear-scan shape a
/// hash-consed connection table needs when entries aren't simple integers.
///
/// Only resolves [`crate::input::StringInput`] keys; non-string inputs
/// simply find no entries. [`CustomVocabulary`] is the escape hatch for
/// anything else.
pub struct HashMapVocabulary {
    entries: HashMap<String, Vec<Entry>>,
    connections: HashMap<u64, Vec<(Entry, Entry, i32)>>,
}

impl HashMapVocabulary {
    #[must_use]
    pub fn new(entries: Vec<(String, Entry)>, connections: Vec<(Entry, Entry, i32)>) -> Self {
        let mut by_key: HashMap<String, Vec<Entry>> = HashMap::new();
        for (key, entry) in entries {
            by_key.entry(key).or_default().push(entry);
        }
        let mut by_hash: HashMap<u64, Vec<(Entry, Entry, i32)>> = HashMap::new();
        for (from, to, cost) in connections {
            let bucket_key = from.hash_value() ^ to.hash_value();
            by_hash.entry(bucket_key).or_default().push((from, to, cost));
        }
        Self {
            entries: by_key,
            connections: by_hash,
        }
    }
}

impl Vocabulary for HashMapVocabulary {
    fn find_entries(&self, key: &dyn Input) -> Vec<Entry> {
        let Some(string_input) = key.as_any().downcast_ref::<crate::input::StringInput>() else {
            return Vec::new();
        };
        self.entries
            .get(&string_input.to_string_lossy())
            .cloned()
            .unwrap_or_default()
    }

    fn find_connection(&self, from: &Entry, to: &Entry) -> i32 {
        let bucket_key = from.hash_value() ^ to.hash_value();
        self.connections
            .get(&bucket_key)
            .and_then(|bucket| {
                bucket
                    .iter()
                    .find(|(f, t, _)| f.matches(from) && t.matches(to))
            })
            .map_or(CONNECTION_SENTINEL, |(_, _, cost)| *cost)
    }
}

/// A vocabulary dispatched entirely through caller-supplied closures, the
/// same function-object shape as [`crate::codec::ValueCodec`], for callers
/// whose lookup logic doesn't fit a plain string map (trie-backed
/// vocabularies, vocabularies over non-string inputs, and so on).
pub struct CustomVocabulary {
    find_entries: Rc<dyn Fn(&dyn Input) -> Vec<Entry>>,
    find_connection: Rc<dyn Fn(&Entry, &Entry) -> i32>,
}

impl CustomVocabulary {
    pub fn new(
        find_entries: impl Fn(&dyn Input) -> Vec<Entry> + 'static,
        find_connection: impl Fn(&Entry, &Entry) -> i32 + 'static,
    ) -> Self {
        Self {
            find_entries: Rc::new(find_entries),
            find_connection: Rc::new(find_connection),
        }
    }
}

impl Vocabulary for CustomVocabulary {
    fn find_entries(&self, key: &dyn Input) -> Vec<Entry> {
        (self.find_entries)(key)
    }

    fn find_connection(&self, from: &Entry, to: &Entry) -> i32 {
        (self.find_connection)(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::StringInput;

    fn entry(text: &str, cost: i32) -> Entry {
        Entry::new(Box::new(StringInput::new(text)), Rc::new(()), cost)
    }

    #[test]
    fn finds_entries_by_string_key() {
        let vocab = HashMapVocabulary::new(
            vec![
                ("Alice".to_string(), entry("Alice", 1)),
                ("Alice".to_string(), entry("Alice", 2)),
            ],
            Vec::new(),
        );
        let found = vocab.find_entries(&StringInput::new("Alice"));
        assert_eq!(2, found.len());
    }

    #[test]
    fn unknown_key_yields_no_entries() {
        let vocab = HashMapVocabulary::new(Vec::new(), Vec::new());
        assert!(vocab.find_entries(&StringInput::new("Alice")).is_empty());
    }

    #[test]
    fn connection_cost_round_trips_and_defaults_to_sentinel() {
        let alice = entry("Alice", 1);
        let bob = entry("Bob", 2);
        let vocab = HashMapVocabulary::new(Vec::new(), vec![(alice.clone(), bob.clone(), 7)]);
        assert_eq!(7, vocab.find_connection(&alice, &bob));
        assert_eq!(CONNECTION_SENTINEL, vocab.find_connection(&bob, &alice));
    }

    #[test]
    fn custom_vocabulary_dispatches_through_closures() {
        let vocab = CustomVocabulary::new(
            |_key: &dyn Input| vec![entry("x", 0)],
            |_from: &Entry, _to: &Entry| 3,
        );
        assert_eq!(1, vocab.find_entries(&StringInput::new("anything")).len());
        assert_eq!(3, vocab.find_connection(&entry("a", 0), &entry("b", 0)));
    }
}
