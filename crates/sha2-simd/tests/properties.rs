//! Property tests against an independent SHA-2 implementation, plus
//! determinism, output size and avalanche checks.

use proptest::prelude::*;
use sha2::Digest as _;
use sha2_simd::{
    Backend, hash224, hash224_batch, hash256, hash256_with, hash384, hash384_batch, hash512,
    hash512_with,
};
use test_support::{flip_bit, hamming_distance, random_bytes};

proptest! {
    #[test]
    fn matches_reference_implementation(data in proptest::collection::vec(any::<u8>(), 0..1024)) {
        let d224 = hash224(&data);
        let d256 = hash256(&data);
        let d384 = hash384(&data);
        let d512 = hash512(&data);
        let expected224 = sha2::Sha224::digest(&data);
        let expected256 = sha2::Sha256::digest(&data);
        let expected384 = sha2::Sha384::digest(&data);
        let expected512 = sha2::Sha512::digest(&data);
        prop_assert_eq!(d224.as_bytes(), &expected224[..]);
        prop_assert_eq!(d256.as_bytes(), &expected256[..]);
        prop_assert_eq!(d384.as_bytes(), &expected384[..]);
        prop_assert_eq!(d512.as_bytes(), &expected512[..]);
    }

    #[test]
    fn batches_match_reference_implementation(
        inputs in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..300), 0..20)
    ) {
        let d224 = hash224_batch(&inputs);
        let d384 = hash384_batch(&inputs);
        prop_assert_eq!(d224.len(), inputs.len());
        for (i, input) in inputs.iter().enumerate() {
            let expected224 = sha2::Sha224::digest(input);
            let expected384 = sha2::Sha384::digest(input);
            prop_assert_eq!(d224[i].as_bytes(), &expected224[..]);
            prop_assert_eq!(d384[i].as_bytes(), &expected384[..]);
        }
    }

    #[test]
    fn every_available_backend_matches_portable(data in proptest::collection::vec(any::<u8>(), 0..600)) {
        let d256 = hash256_with(Backend::Portable, &data).unwrap();
        let d512 = hash512_with(Backend::Portable, &data).unwrap();
        for backend in Backend::ALL.into_iter().filter(|b| b.is_available()) {
            prop_assert_eq!(hash256_with(backend, &data).unwrap(), d256);
            if backend.lanes64() > 0 {
                prop_assert_eq!(hash512_with(backend, &data).unwrap(), d512);
            }
        }
    }
}

#[test]
fn repeated_calls_are_deterministic() {
    let data = random_bytes(4096);
    assert_eq!(hash224(&data), hash224(&data));
    assert_eq!(hash256(&data), hash256(&data));
    assert_eq!(hash384(&data), hash384(&data));
    assert_eq!(hash512(&data), hash512(&data));
}

#[test]
fn output_sizes_are_fixed() {
    for len in [0usize, 1, 63, 64, 65, 127, 128, 129, 10_000] {
        let data = vec![0x5a; len];
        assert_eq!(hash224(&data).as_bytes().len(), 28);
        assert_eq!(hash256(&data).as_bytes().len(), 32);
        assert_eq!(hash384(&data).as_bytes().len(), 48);
        assert_eq!(hash512(&data).as_bytes().len(), 64);
    }
}

#[test]
fn single_bit_flip_changes_about_half_the_output() {
    let data = test_support::seeded_bytes(200, 7);
    for bit in [0usize, 7, 800, 1599] {
        let flipped = flip_bit(&data, bit);

        let d256 = hamming_distance(hash256(&data).as_bytes(), hash256(&flipped).as_bytes());
        assert!((64..=192).contains(&d256), "bit={bit} distance={d256}");

        let d512 = hamming_distance(hash512(&data).as_bytes(), hash512(&flipped).as_bytes());
        assert!((160..=352).contains(&d512), "bit={bit} distance={d512}");
    }
}
