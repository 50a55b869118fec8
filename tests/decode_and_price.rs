use proptest::prelude::*;
use raydium_clmm_feed::{
    calculate_price, decode_pool_state, price_from_sqrt_x64, DecodeError, PoolState, Uint128,
    POOL_STATE_LEN,
};

fn pool_bytes(sqrt_price_x64: Uint128, decimals_a: u8, decimals_b: u8) -> Vec<u8> {
    let mut data = vec![0u8; POOL_STATE_LEN];
    let sqrt = PoolState::field_offset("sqrt_price_x64").unwrap();
    data[sqrt..sqrt + 8].copy_from_slice(&sqrt_price_x64.lo.to_le_bytes());
    data[sqrt + 8..sqrt + 16].copy_from_slice(&sqrt_price_x64.hi.to_le_bytes());
    data[PoolState::field_offset("mint_decimals_a").unwrap()] = decimals_a;
    data[PoolState::field_offset("mint_decimals_b").unwrap()] = decimals_b;
    data
}

#[test]
fn test_end_to_end_price() {
    let data = pool_bytes(Uint128::new(0, 2), 6, 6);
    let pool = decode_pool_state(&data).unwrap();
    assert_eq!(pool.sqrt_price_x64, Uint128::new(0, 2));
    assert_eq!(calculate_price(&pool), 4.0);

    let data = pool_bytes(Uint128::new(0, 2), 6, 3);
    let pool = decode_pool_state(&data).unwrap();
    assert_eq!(calculate_price(&pool), 4000.0);
}

#[test]
fn test_every_short_buffer_is_truncated() {
    let data = pool_bytes(Uint128::new(0, 1), 9, 6);
    for len in 0..POOL_STATE_LEN {
        match decode_pool_state(&data[..len]) {
            Err(DecodeError::Truncated {
                offset,
                needed,
                available,
                ..
            }) => {
                assert!(offset <= len, "offset {} beyond buffer of {}", offset, len);
                assert_eq!(needed, POOL_STATE_LEN);
                assert_eq!(available, len);
            }
            Err(other) => panic!("unexpected error for {} bytes: {}", len, other),
            Ok(_) => panic!("decoded a {}-byte buffer", len),
        }
    }
}

#[test]
fn test_known_price_fields() {
    let pool = decode_pool_state(&pool_bytes(Uint128::new(0, 1), 9, 9)).unwrap();
    assert_eq!(calculate_price(&pool), 1.0);

    let pool = decode_pool_state(&pool_bytes(Uint128::new(0, 0), 9, 6)).unwrap();
    assert_eq!(calculate_price(&pool), 0.0);
}

proptest! {
    #[test]
    fn prop_fixed_size_buffer_round_trips(data in prop::collection::vec(any::<u8>(), POOL_STATE_LEN)) {
        let pool = decode_pool_state(&data).unwrap();
        prop_assert_eq!(pool.to_bytes().unwrap(), data);
    }

    #[test]
    fn prop_trailing_bytes_ignored(
        data in prop::collection::vec(any::<u8>(), POOL_STATE_LEN),
        extra in prop::collection::vec(any::<u8>(), 1..256),
    ) {
        let mut longer = data.clone();
        longer.extend_from_slice(&extra);
        prop_assert_eq!(decode_pool_state(&longer).unwrap(), decode_pool_state(&data).unwrap());
    }

    #[test]
    fn prop_price_never_negative_or_nan(lo in any::<u64>(), hi in any::<u64>(), a in any::<u8>(), b in any::<u8>()) {
        let price = price_from_sqrt_x64(Uint128::new(lo, hi), a, b);
        prop_assert!(!price.is_nan());
        prop_assert!(price >= 0.0);
    }

    #[test]
    fn prop_decimal_scaling(lo in any::<u64>(), hi in 0u64..1 << 32, d in 0u8..18) {
        let sqrt = Uint128::new(lo, hi);
        let base = price_from_sqrt_x64(sqrt, d, d);

        prop_assert_eq!(price_from_sqrt_x64(sqrt, d + 1, d), base * 10.0);

        let down = price_from_sqrt_x64(sqrt, d, d + 1);
        prop_assert!((down - base / 10.0).abs() <= base.abs() * 1e-15);
    }
}
