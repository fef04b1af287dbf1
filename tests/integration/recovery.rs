//! Parity produced by each backend recovers lost data shards.

use splinter_engine::{BackendKind, EncodeRequest, encode};
use splinter_tests::{rebuild_data, test_data};

#[test]
fn test_reference_recovers_from_any_k_shards() {
    let (k, m) = (4, 3);
    let set = encode(test_data(4 * 256), EncodeRequest::new(k, m, 256)).unwrap();
    let originals: Vec<Vec<u8>> = (0..k).map(|i| set.data_shard(i).unwrap().to_vec()).collect();

    // Every way of losing m shards out of k + m.
    let n = k + m;
    for lost_mask in 0u32..(1 << n) {
        if lost_mask.count_ones() as usize != m {
            continue;
        }
        let keep: Vec<usize> = (0..n).filter(|i| lost_mask & (1 << i) == 0).collect();
        assert_eq!(rebuild_data(&set, &keep), originals, "kept {keep:?}");
    }
}

#[test]
fn test_reference_recovers_padded_tail() {
    let data = test_data(1234);
    let set = encode(data.clone(), EncodeRequest::new(5, 2, 300)).unwrap();
    // Lose a full shard and the short tail shard.
    let rebuilt = rebuild_data(&set, &[0, 1, 2, 5, 6]);
    let joined: Vec<u8> = rebuilt.concat();
    assert_eq!(&joined[..1234], &data[..]);
    assert!(joined[1234..].iter().all(|&b| b == 0));
}

#[test]
fn test_native_parity_decodes() {
    let (k, m) = (6, 3);
    let request = EncodeRequest::new(k, m, 512).with_backend(BackendKind::Native);
    let set = encode(test_data(6 * 512), request).unwrap();

    // Keep data shards 1, 2, 4 and all parity.
    let original = [1usize, 2, 4].map(|i| (i, set.data_shard(i).unwrap()));
    let recovery = (0..m).map(|j| (j, set.parity_shard(j).unwrap()));
    let restored = reed_solomon_simd::decode(k, m, original, recovery).unwrap();

    for lost in [0usize, 3, 5] {
        assert_eq!(
            restored.get(&lost).map(Vec::as_slice),
            set.data_shard(lost),
            "shard {lost}"
        );
    }
}

#[test]
fn test_native_odd_shard_size_decodes() {
    // Three full 167-byte data shards.
    let (k, m) = (3, 2);
    let data = test_data(501);
    let request = EncodeRequest::new(k, m, 167).with_backend(BackendKind::Native);
    let set = encode(data.clone(), request).unwrap();
    assert_eq!(set.shard_size(), 167);

    // Every byte but the last is coded by the SIMD engine.
    let original = [(1usize, &set.data_shard(1).unwrap()[..166])];
    let recovery = (0..m).map(|j| (j, &set.parity_shard(j).unwrap()[..166]));
    let restored = reed_solomon_simd::decode(k, m, original, recovery).unwrap();
    assert_eq!(restored[&0], &data[..166]);
    assert_eq!(restored[&2], &data[334..500]);
}
