//! Consensus-sensitive tuning constants. These are
//! bit-exact: changing any of them changes which transactions are
//! admissible, so they are `pub const`s rather than runtime configuration.
//!
//! [`MAX_MONEY`] and [`COINBASE_MATURITY`] are not given bit-exact values
//! by the underlying chain's own constants; the values chosen here are
//! recorded in `DESIGN.md`.

/// Minimum absolute transaction fee, in the chain's smallest coin unit.
pub const MIN_TX_FEE: u64 = 10_000;

/// Maximum serialized transaction size, in bytes.
pub const MAX_TRANSACTION_SIZE: usize = 1_000_000;

/// Maximum possible money supply, in the chain's smallest coin unit.
/// Open Question resolution: 10 billion whole coins at 8 decimal places,
/// matching the order of magnitude of the UTXO chains this validator's
/// asset model is modeled on.
pub const MAX_MONEY: u64 = 10_000_000_000 * 100_000_000;

/// Height gap required between a coinbase output's confirmation and a
/// transaction spending it. Open Question resolution: 100 blocks, the
/// conventional coinbase-maturity depth used by comparable UTXO chains.
pub const COINBASE_MATURITY: u64 = 100;

/// Mainnet height at which nova-feature transactions activate. Testnet
/// always has nova active
pub const NOVA_MAINNET_ACTIVATION_HEIGHT: u64 = 1_270_000;

/// Allowed coinbase script size range, inclusive.
pub const COINBASE_SCRIPT_SIZE_RANGE: std::ops::RangeInclusive<usize> = 2..=100;

/// Transaction version thresholds Ordered the way the
/// rule text implies: `CHECK_OUTPUT_SCRIPT <= CHECK_NOVA_FEATURE <
/// CHECK_NOVA_TESTNET < MAX_VERSION`.
pub const TX_VERSION_FIRST: u32 = 1;
pub const TX_VERSION_CHECK_OUTPUT_SCRIPT: u32 = 2;
pub const TX_VERSION_CHECK_NOVA_FEATURE: u32 = 3;
pub const TX_VERSION_CHECK_NOVA_TESTNET: u32 = 4;
pub const TX_VERSION_MAX: u32 = 5;

/// Allowed `lock_height` values for pay-key-hash-with-lock-height outputs
/// Each value is
/// a number of blocks a locked output must mature for, mirroring the
/// deposit-tier tables used by comparable UTXO chains with timed outputs.
pub const OUTPUT_LOCK_HEIGHTS: &[u32] = &[25_200, 108_000, 331_200, 655_200];

pub fn is_allowed_output_lock_height(height: u32) -> bool {
    OUTPUT_LOCK_HEIGHTS.contains(&height)
}
