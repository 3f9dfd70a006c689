//! Coin unit helpers.

/// Base units per whole coin on the deposit chain.
pub const SUBUNITS_PER_COIN: u64 = 100_000_000;

/// Format a base-unit value as a whole-coin decimal string.
pub fn format_coin(value: u64) -> String {
    format!(
        "{}.{:08}",
        value / SUBUNITS_PER_COIN,
        value % SUBUNITS_PER_COIN
    )
}
