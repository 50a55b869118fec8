use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;
use std::cmp::Ordering;

use crate::error::DecodeError;

pub const PUBKEY_LEN: usize = 32;
pub const REWARD_NUM: usize = 3;
pub const TICK_ARRAY_BITMAP_WORDS: usize = 16;
pub const POOL_PADDING3_WORDS: usize = 57;

/// Unsigned 128-bit value stored as two little-endian words, low word first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize)]
pub struct Uint128 {
    pub lo: u64,
    pub hi: u64,
}

impl Uint128 {
    pub const fn new(lo: u64, hi: u64) -> Self {
        Self { lo, hi }
    }

    pub const fn as_u128(&self) -> u128 {
        ((self.hi as u128) << 64) | self.lo as u128
    }

    /// Lossy conversion: `hi * 2^64 + lo` in double precision. Values wider than
    /// the 53-bit mantissa lose their low-order bits.
    pub fn to_f64(&self) -> f64 {
        self.hi as f64 * 2f64.powi(64) + self.lo as f64
    }
}

impl From<u128> for Uint128 {
    fn from(value: u128) -> Self {
        Self {
            lo: value as u64,
            hi: (value >> 64) as u64,
        }
    }
}

impl From<Uint128> for u128 {
    fn from(value: Uint128) -> Self {
        value.as_u128()
    }
}

impl Ord for Uint128 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_u128().cmp(&other.as_u128())
    }
}

impl PartialOrd for Uint128 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct RewardInfo {
    pub reward_state: u8,
    pub open_time: u64,
    pub end_time: u64,
    pub last_update_time: u64,
    pub emissions_per_second_x64: Uint128,
    pub reward_total_emissioned: u64,
    pub reward_claimed: u64,
    pub token_mint: Pubkey,
    pub token_vault: Pubkey,
    pub creator: Pubkey,
    pub reward_growth_global_x64: Uint128,
}

/// Raydium CLMM pool account, field for field in on-chain order.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct PoolState {
    pub padding: [u8; 8],
    pub bump: u8,
    pub amm_config: Pubkey,
    pub creator: Pubkey,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub vault_a: Pubkey,
    pub vault_b: Pubkey,
    pub observation_id: Pubkey,
    pub mint_decimals_a: u8,
    pub mint_decimals_b: u8,
    pub tick_spacing: u16,
    pub liquidity: Uint128,
    pub sqrt_price_x64: Uint128,
    pub tick_current: i32,
    pub observation_index: u16,
    pub observation_update_duration: u16,
    pub fee_growth_global_x64_a: Uint128,
    pub fee_growth_global_x64_b: Uint128,
    pub protocol_fees_token_a: u64,
    pub protocol_fees_token_b: u64,
    pub swap_in_amount_token_a: Uint128,
    pub swap_out_amount_token_b: Uint128,
    pub swap_in_amount_token_b: Uint128,
    pub swap_out_amount_token_a: Uint128,
    pub status: u8,
    pub padding2: [u8; 7],
    pub reward_infos: [RewardInfo; REWARD_NUM],
    pub tick_array_bitmap: [u64; TICK_ARRAY_BITMAP_WORDS],
    pub total_fees_token_a: u64,
    pub total_fees_claimed_token_a: u64,
    pub total_fees_token_b: u64,
    pub total_fees_claimed_token_b: u64,
    pub fund_fees_token_a: u64,
    pub fund_fees_token_b: u64,
    pub start_time: u64,
    pub padding3: [u64; POOL_PADDING3_WORDS],
}

/// One positional entry of a layout: `count` consecutive elements of `size` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub size: usize,
    pub count: usize,
}

impl FieldSpec {
    const fn one(name: &'static str, size: usize) -> Self {
        Self {
            name,
            size,
            count: 1,
        }
    }

    const fn array(name: &'static str, size: usize, count: usize) -> Self {
        Self { name, size, count }
    }

    pub const fn width(&self) -> usize {
        self.size * self.count
    }
}

const fn schema_len(schema: &[FieldSpec]) -> usize {
    let mut len = 0;
    let mut i = 0;
    while i < schema.len() {
        len += schema[i].width();
        i += 1;
    }
    len
}

// https://github.com/raydium-io/raydium-sdk/blob/master/src/clmm/layout.ts RewardInfo
pub const REWARD_INFO_SCHEMA: &[FieldSpec] = &[
    FieldSpec::one("reward_state", 1),
    FieldSpec::one("open_time", 8),
    FieldSpec::one("end_time", 8),
    FieldSpec::one("last_update_time", 8),
    FieldSpec::one("emissions_per_second_x64", 16),
    FieldSpec::one("reward_total_emissioned", 8),
    FieldSpec::one("reward_claimed", 8),
    FieldSpec::one("token_mint", PUBKEY_LEN),
    FieldSpec::one("token_vault", PUBKEY_LEN),
    FieldSpec::one("creator", PUBKEY_LEN),
    FieldSpec::one("reward_growth_global_x64", 16),
];

pub const REWARD_INFO_LEN: usize = schema_len(REWARD_INFO_SCHEMA);

// https://github.com/raydium-io/raydium-sdk/blob/master/src/clmm/layout.ts PoolInfoLayout
pub const POOL_STATE_SCHEMA: &[FieldSpec] = &[
    FieldSpec::array("padding", 1, 8),
    FieldSpec::one("bump", 1),
    FieldSpec::one("amm_config", PUBKEY_LEN),
    FieldSpec::one("creator", PUBKEY_LEN),
    FieldSpec::one("mint_a", PUBKEY_LEN),
    FieldSpec::one("mint_b", PUBKEY_LEN),
    FieldSpec::one("vault_a", PUBKEY_LEN),
    FieldSpec::one("vault_b", PUBKEY_LEN),
    FieldSpec::one("observation_id", PUBKEY_LEN),
    FieldSpec::one("mint_decimals_a", 1),
    FieldSpec::one("mint_decimals_b", 1),
    FieldSpec::one("tick_spacing", 2),
    FieldSpec::one("liquidity", 16),
    FieldSpec::one("sqrt_price_x64", 16),
    FieldSpec::one("tick_current", 4),
    FieldSpec::one("observation_index", 2),
    FieldSpec::one("observation_update_duration", 2),
    FieldSpec::one("fee_growth_global_x64_a", 16),
    FieldSpec::one("fee_growth_global_x64_b", 16),
    FieldSpec::one("protocol_fees_token_a", 8),
    FieldSpec::one("protocol_fees_token_b", 8),
    FieldSpec::one("swap_in_amount_token_a", 16),
    FieldSpec::one("swap_out_amount_token_b", 16),
    FieldSpec::one("swap_in_amount_token_b", 16),
    FieldSpec::one("swap_out_amount_token_a", 16),
    FieldSpec::one("status", 1),
    FieldSpec::array("padding2", 1, 7),
    FieldSpec::array("reward_infos", REWARD_INFO_LEN, REWARD_NUM),
    FieldSpec::array("tick_array_bitmap", 8, TICK_ARRAY_BITMAP_WORDS),
    FieldSpec::one("total_fees_token_a", 8),
    FieldSpec::one("total_fees_claimed_token_a", 8),
    FieldSpec::one("total_fees_token_b", 8),
    FieldSpec::one("total_fees_claimed_token_b", 8),
    FieldSpec::one("fund_fees_token_a", 8),
    FieldSpec::one("fund_fees_token_b", 8),
    FieldSpec::one("start_time", 8),
    FieldSpec::array("padding3", 8, POOL_PADDING3_WORDS),
];

pub const POOL_STATE_LEN: usize = schema_len(POOL_STATE_SCHEMA);

/// Walks the schema and reports the first element that does not fit in `available` bytes.
fn check_len(schema: &'static [FieldSpec], available: usize) -> Result<(), DecodeError> {
    let needed = schema_len(schema);
    let mut offset = 0;
    for field in schema {
        for _ in 0..field.count {
            if offset + field.size > available {
                return Err(DecodeError::Truncated {
                    field: field.name,
                    offset,
                    needed,
                    available,
                });
            }
            offset += field.size;
        }
    }
    Ok(())
}

/// Decodes a pool account. Bytes past `POOL_STATE_LEN` are ignored.
///
/// Every byte value is legal in every field, so once the length check passes
/// the positional decode only fails if `PoolState` and `POOL_STATE_SCHEMA`
/// disagree on the layout.
pub fn decode_pool_state(data: &[u8]) -> Result<PoolState, DecodeError> {
    check_len(POOL_STATE_SCHEMA, data.len())?;

    let mut buf = &data[..POOL_STATE_LEN];
    PoolState::deserialize(&mut buf).map_err(|e| DecodeError::Layout(e.to_string()))
}

fn schema_offset(schema: &[FieldSpec], name: &str) -> Option<usize> {
    let mut offset = 0;
    for field in schema {
        if field.name == name {
            return Some(offset);
        }
        offset += field.width();
    }
    None
}

impl RewardInfo {
    /// Byte offset of a field within one reward slot.
    pub fn field_offset(name: &str) -> Option<usize> {
        schema_offset(REWARD_INFO_SCHEMA, name)
    }
}

impl PoolState {
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        decode_pool_state(data)
    }

    /// Serializes the record back to its exact on-chain layout.
    pub fn to_bytes(&self) -> std::io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(POOL_STATE_LEN);
        self.serialize(&mut out)?;
        Ok(out)
    }

    /// Byte offset of a top-level field in the account layout.
    pub fn field_offset(name: &str) -> Option<usize> {
        schema_offset(POOL_STATE_SCHEMA, name)
    }
}
