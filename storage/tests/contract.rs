//! Both backends must honour the same ordered key-value contract.

use tempfile::tempdir;
use treasury_storage::*;

fn exercise(store: &mut dyn KvStore) {
    for epoch in [5u64, 1, 3] {
        let mut key = vec![0x01];
        key.extend_from_slice(&epoch.to_be_bytes());
        store.set(&key, &epoch.to_be_bytes()).unwrap();
    }
    store.set(&[0x02, 0], b"other series").unwrap();

    let epochs: Vec<u64> = store
        .scan_prefix(&[0x01])
        .unwrap()
        .into_iter()
        .map(|(_, value)| {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&value);
            u64::from_be_bytes(buf)
        })
        .collect();
    assert_eq!(epochs, vec![1, 3, 5]);

    assert_eq!(store.scan_prefix(&[0x03]).unwrap().len(), 0);
    assert_eq!(store.get(&[0x02, 0]).unwrap(), Some(b"other series".to_vec()));

    let mut batch = WriteBatch::new();
    batch.set(&[0x02, 1], b"staged");
    batch.delete(&[0x02, 0]);
    store.apply_batch(batch).unwrap();
    assert_eq!(store.scan_prefix(&[0x02]).unwrap(), vec![(vec![0x02, 1], b"staged".to_vec())]);
}

#[test]
fn test_memory_store_contract() {
    let mut store = MemoryStore::new();
    exercise(&mut store);
}

#[test]
fn test_sled_store_contract() {
    let dir = tempdir().unwrap();
    let mut store = SledStore::open(dir.path()).unwrap();
    exercise(&mut store);
}
