//! End-to-end split + encode through the public engine API.

use bytes::Bytes;
use splinter_engine::{BackendKind, EncodeOrchestrator, EncodeRequest, ErrorKind, ShardKind, encode};
use splinter_tests::{reassemble, test_data};

const BACKENDS: [BackendKind; 2] = [BackendKind::Reference, BackendKind::Native];

#[test]
fn test_layouts_preserve_input() {
    // (k, m, shard_size, input_len)
    let cases = [
        (4, 2, 2, 6),
        (4, 2, 2, 8),
        (1, 1, 64, 64),
        (10, 4, 4096, 40_960),
        (10, 4, 4096, 30_000),
        (6, 3, 1000, 998),
        (16, 16, 256, 2),
        (3, 0, 128, 300),
    ];

    for backend in BACKENDS {
        for (k, m, size, len) in cases {
            let data = test_data(len);
            let request = EncodeRequest::new(k, m, size).with_backend(backend);
            let set = encode(data.clone(), request).unwrap();

            let shard_size = size.min(len);
            assert_eq!(set.len(), k + m, "{backend} {k}+{m}");
            assert_eq!(set.shard_size(), shard_size);
            assert!(set.iter().all(|s| s.data.len() == shard_size));
            assert_eq!(reassemble(&set), data, "{backend} {k}+{m}x{size} len {len}");

            // Everything past the input is zero padding.
            let padded: Vec<u8> = (0..k).flat_map(|i| set.data_shard(i).unwrap().to_vec()).collect();
            assert!(padded[len..].iter().all(|&b| b == 0));
        }
    }
}

#[test]
fn test_shard_order_and_kinds() {
    let set = encode(test_data(100), EncodeRequest::new(5, 3, 20)).unwrap();
    let kinds: Vec<ShardKind> = set.iter().map(|s| s.kind).collect();
    assert_eq!(&kinds[..5], &[ShardKind::Data; 5]);
    assert_eq!(&kinds[5..], &[ShardKind::Parity; 3]);
    for (i, shard) in set.iter().enumerate() {
        assert_eq!(shard.index as usize, i);
    }
}

#[test]
fn test_input_longer_than_capacity_is_truncated() {
    let data = test_data(1000);
    let set = encode(data.clone(), EncodeRequest::new(4, 2, 100)).unwrap();
    assert_eq!(set.input_len(), 1000);
    assert_eq!(set.consumed_len(), 400);
    assert_eq!(reassemble(&set), &data[..400]);
}

#[test]
fn test_full_shards_are_zero_copy() {
    let input = Bytes::from(test_data(4096));
    let set = encode(input.clone(), EncodeRequest::new(4, 2, 1024)).unwrap();
    assert_eq!(set.direct_shards(), 4);
    for i in 0..4 {
        let shard = set.data_shard(i).unwrap();
        assert_eq!(shard.as_ptr(), input[i * 1024..].as_ptr());
    }
}

#[test]
fn test_arena_shards_are_aligned() {
    for backend in BACKENDS {
        let request = EncodeRequest::new(8, 4, 1000).with_backend(backend);
        let set = encode(test_data(2500), request).unwrap();
        // Two full shards are views; the tail, the empty slots and parity
        // live in the arena.
        assert_eq!(set.direct_shards(), 2);
        for shard in set.iter().skip(2) {
            assert_eq!(shard.data.as_ptr() as usize % 64, 0, "shard {}", shard.index);
            assert!(shard.capacity >= shard.data.len());
            assert_eq!(shard.capacity % 64, 0);
        }
    }
}

#[test]
fn test_orchestrator_reused_for_many_inputs() {
    for backend in BACKENDS {
        let orchestrator =
            EncodeOrchestrator::new(EncodeRequest::new(4, 2, 512).with_backend(backend)).unwrap();
        for len in [0, 2, 510, 512, 2048, 5000] {
            let data = test_data(len);
            let set = orchestrator.encode(data.clone()).unwrap();
            let expected_len = data.len().min(4 * 512);
            assert_eq!(reassemble(&set), &data[..expected_len]);
        }
    }
}

#[test]
fn test_invalid_requests_fail_before_encoding() {
    for backend in BACKENDS {
        for (k, m, size) in [(0, 2, 2), (200, 57, 2), (4, 2, 0)] {
            let request = EncodeRequest::new(k, m, size).with_backend(backend);
            let err = encode(test_data(64), request).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidConfiguration, "{k}+{m}x{size}");
        }
    }
}

#[test]
fn test_max_shard_count() {
    for backend in BACKENDS {
        let request = EncodeRequest::new(200, 56, 4).with_backend(backend);
        let set = encode(test_data(800), request).unwrap();
        assert_eq!(set.len(), 256);
        assert_eq!(set.shard(255).unwrap().index, 255);
        assert!(set.shard(256).is_none());
    }
}
