use trie_lattice::double_array::DoubleArray;
use trie_lattice::storage::Storage;
use trie_lattice::trie::Trie;
use trie_lattice::codec::{bytes_codec, u32_codec};

fn dictionary() -> Vec<(Vec<u8>, Vec<u8>)> {
    vec![
        (b"ant".to_vec(), b"insect".to_vec()),
        (b"anteater".to_vec(), b"mammal".to_vec()),
        (b"bee".to_vec(), b"insect".to_vec()),
        (b"beetle".to_vec(), b"insect".to_vec()),
    ]
}

#[test]
fn exact_find_across_shared_prefixes() {
    let da = DoubleArray::build(&dictionary(), 16, |_| {}, || {}).unwrap();
    assert_eq!(Some(b"insect".to_vec()), da.find(b"ant"));
    assert_eq!(Some(b"mammal".to_vec()), da.find(b"anteater"));
    assert_eq!(None, da.find(b"an"));
    assert_eq!(None, da.find(b"anteaters"));
}

#[test]
fn subtrie_iteration_matches_prefix_restricted_view() {
    let da = DoubleArray::build(&dictionary(), 16, |_| {}, || {}).unwrap();
    let sub = da.subtrie(b"ant").unwrap();
    let mut found: Vec<_> = sub.iter().collect();
    found.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(
        vec![
            (Vec::new(), b"insect".to_vec()),
            (b"eater".to_vec(), b"mammal".to_vec()),
        ],
        found
    );
}

#[test]
fn full_trie_iteration_is_sorted_and_complete() {
    let da = DoubleArray::build(&dictionary(), 16, |_| {}, || {}).unwrap();
    let collected: Vec<_> = da.iter().map(|(k, _)| k).collect();
    let mut expected: Vec<_> = dictionary().into_iter().map(|(k, _)| k).collect();
    expected.sort();
    assert_eq!(expected, collected);
}

#[test]
fn generic_trie_wrapper_round_trips_typed_values() {
    let entries = vec![
        ("one".to_string(), 1u32),
        ("two".to_string(), 2u32),
        ("three".to_string(), 3u32),
    ];
    let trie = Trie::build(&entries, |k: &String| k.as_bytes().to_vec(), u32_codec(), 16).unwrap();
    assert_eq!(Some(2), trie.find(&"two".to_string()).unwrap());
    assert_eq!(None, trie.find(&"four".to_string()).unwrap());
}

#[test]
fn fixed_value_mmap_round_trip_is_byte_exact() {
    // Re-key every value through a fixed 4-byte u32 codec so the mmap
    // path's fixed-size requirement is satisfiable.
    let entries: Vec<(Vec<u8>, Vec<u8>)> = dictionary()
        .into_iter()
        .enumerate()
        .map(|(i, (k, _))| (k, u32_codec().serialize(&(i as u32))))
        .collect();
    let da = DoubleArray::build(&entries, 16, |_| {}, || {}).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dict.trie");
    let mut bytes = Vec::new();
    da.storage().serialize_fixed(&mut bytes, 4).unwrap();
    std::fs::write(&path, &bytes).unwrap();

    let loaded_storage = Storage::load_mmap(&path, 4).unwrap();
    let loaded = DoubleArray::from_storage(loaded_storage);
    for (key, expected_value) in entries {
        assert_eq!(Some(expected_value), loaded.find(&key));
    }
}

#[test]
fn variable_size_values_round_trip_through_bytes_codec() {
    let codec = bytes_codec();
    let serialized = codec.serialize(&b"hello".to_vec());
    assert_eq!(b"hello".to_vec(), codec.deserialize(&serialized).unwrap());
}

#[test]
fn shared_storage_mutation_is_visible_through_every_alias() {
    let storage = Storage::new_in_memory(4).into_shared();
    let alias = storage.clone();
    alias.set_base_at(2, 123).unwrap();
    assert_eq!(123, storage.base_at(2));
}
