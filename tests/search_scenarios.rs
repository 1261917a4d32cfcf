use acbf::{search, ActivationBytes, Checksum, SearchConfig, SearchResult};

const KNOWN: &str = "7b19e237cd6eef8770b30a93fe165070ab199e54";

fn known_checksum() -> Checksum {
    KNOWN.parse().unwrap()
}

#[test]
fn finds_known_bytes_from_its_block() {
    // start at 0x1C with a single worker, as an operator resuming a run would
    let result = search(known_checksum(), &SearchConfig::new(0x1c, 255, 1)).unwrap();
    assert_eq!(result, SearchResult::Found(ActivationBytes([0x1c, 0xeb, 0x00, 0xda])));
}

#[test]
fn same_answer_for_any_worker_count() {
    for workers in [1, 2, 8] {
        let result = search(known_checksum(), &SearchConfig::new(0x1c, 0x1d, workers)).unwrap();
        assert_eq!(
            result.found(),
            Some(ActivationBytes([0x1c, 0xeb, 0x00, 0xda])),
            "workers = {workers}"
        );
    }
}

#[test]
fn zero_checksum_exhausts_last_block() {
    let result = search(Checksum([0u8; 20]), &SearchConfig::new(255, 255, 4)).unwrap();
    assert_eq!(result, SearchResult::NotFound);
}

#[test]
fn range_without_preimage_is_not_found() {
    // the known bytes live in block 0x1c, not 0x1b
    let result = search(known_checksum(), &SearchConfig::new(0x1b, 0x1b, 2)).unwrap();
    assert_eq!(result, SearchResult::NotFound);
}

#[test]
fn invalid_range_is_rejected_before_searching() {
    assert!(search(known_checksum(), &SearchConfig::new(0x1d, 0x1c, 1)).is_err());
}
