//! Independent encodes running at the same time.

use std::sync::Arc;

use splinter_engine::{BackendKind, EncodeOrchestrator, EncodeRequest, encode};
use splinter_tests::test_data;

#[test]
#[ntest::timeout(60000)]
fn test_parallel_orchestrators() {
    // One orchestrator per thread, different layouts and backends.
    let handles: Vec<_> = (0..8usize)
        .map(|i| {
            std::thread::spawn(move || {
                let backend = if i % 2 == 0 {
                    BackendKind::Reference
                } else {
                    BackendKind::Native
                };
                let request = EncodeRequest::new(2 + i, 1 + i % 3, 256 * (i + 1)).with_backend(backend);
                let data = test_data(100_000 + i);
                let orchestrator = EncodeOrchestrator::new(request).unwrap();
                let first = orchestrator.encode(data.clone()).unwrap().to_bytes();
                let again = encode(data, request).unwrap().to_bytes();
                assert_eq!(first, again);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
#[ntest::timeout(60000)]
fn test_shared_reference_backend_large_shards() {
    // Large shards take the multi-threaded path inside the reference backend.
    let request = EncodeRequest::new(4, 2, 256 * 1024);
    let orchestrator = Arc::new(EncodeOrchestrator::new(request).unwrap());
    let data = Arc::new(test_data(1024 * 1024));
    let expected = orchestrator.encode(data.to_vec()).unwrap().to_bytes();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let orchestrator = Arc::clone(&orchestrator);
            let data = Arc::clone(&data);
            std::thread::spawn(move || orchestrator.encode(data.to_vec()).unwrap().to_bytes())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
