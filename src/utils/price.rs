use crate::models::pool::{PoolState, Uint128};

// https://github.com/raydium-io/raydium-sdk/blob/master/src/clmm/utils/math.ts sqrtPriceX64ToPrice
pub fn price_from_sqrt_x64(sqrt_price_x64: Uint128, decimals_a: u8, decimals_b: u8) -> f64 {
    let sqrt_price = sqrt_price_x64.to_f64() / 2f64.powi(64);
    let exponent = decimals_a as i32 - decimals_b as i32;

    sqrt_price * sqrt_price * 10f64.powi(exponent)
}

/// Price of token A quoted in token B, adjusted for both mints' decimals.
pub fn calculate_price(pool: &PoolState) -> f64 {
    price_from_sqrt_x64(pool.sqrt_price_x64, pool.mint_decimals_a, pool.mint_decimals_b)
}
