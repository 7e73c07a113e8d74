// Protocol constants

// Game rules
// ==========

/// House edge in basis points. 150 = 1.5%.
pub const HOUSE_EDGE_BPS: u128 = 150;

/// Basis point denominator.
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Rolls are reported as percentages, so the payout is scaled back down by 100.
pub const ROLL_SCALE: u128 = 100;

/// Lowest threshold a player may choose (1% win chance).
pub const MIN_ROLL: u8 = 1;

/// Highest threshold a player may choose (99% win chance).
pub const MAX_ROLL: u8 = 99;

/// Outcomes are drawn from 1..=ROLL_RANGE.
pub const ROLL_RANGE: u128 = 100;

// Time & slots
// ============

/// Slots a bet must stay open before the player can take the stake back.
/// 1000 slots ~ 6.5 minutes (@ 0.4s/slot).
#[cfg(not(feature = "devnet"))]
pub const REFUND_TIMEOUT_SLOTS: u64 = 1000;

/// Short window for devnet testing agility.
#[cfg(feature = "devnet")]
pub const REFUND_TIMEOUT_SLOTS: u64 = 150;

// Accounts
// ========

/// Initial version for account structures.
pub const INITIAL_VERSION: u16 = 1;
