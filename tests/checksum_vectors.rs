use acbf::{derive_checksum, ActivationBytes, Checksum, ChecksumDeriver, Derive, FixedKey};
use quickcheck::quickcheck;

#[test]
fn known_activation_bytes_vector() {
    // 1CEB00DA -> 7b19e237cd6eef8770b30a93fe165070ab199e54
    let expected: Checksum = "7b19e237cd6eef8770b30a93fe165070ab199e54".parse().unwrap();
    let got = derive_checksum(&FixedKey::AUDIBLE, ActivationBytes([0x1c, 0xeb, 0x00, 0xda]));
    assert_eq!(got, expected);
}

#[test]
fn neighbours_of_known_vector_differ() {
    let deriver = ChecksumDeriver::default();
    let base = deriver.derive(ActivationBytes([0x1c, 0xeb, 0x00, 0xda]));
    assert_ne!(deriver.derive(ActivationBytes([0x1c, 0xeb, 0x00, 0xdb])), base);
    assert_ne!(deriver.derive(ActivationBytes([0x1d, 0xeb, 0x00, 0xda])), base);
}

quickcheck! {
    fn derive_is_deterministic(raw: u32) -> bool {
        let ab = ActivationBytes::from_u32(raw);
        let a = ChecksumDeriver::default();
        let b = ChecksumDeriver::new(FixedKey::AUDIBLE);
        a.derive(ab) == b.derive(ab) && a.derive(ab) == derive_checksum(&FixedKey::AUDIBLE, ab)
    }
}

quickcheck! {
    fn activation_bytes_u32_roundtrip(raw: u32) -> bool {
        let ab = ActivationBytes::from_u32(raw);
        ab.to_u32() == raw && ab.block().0 == (raw >> 24) as u8
    }
}
