use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::DiceError,
    utils::roll_from_signature,
};

/// Result of settling one bet against a house signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub outcome: u8,
    pub payout: u64,
}

impl Settlement {
    pub fn won(&self) -> bool {
        self.payout > 0
    }
}

pub fn validate_bet_params(amount: u64, roll: u8) -> Result<()> {
    require!(amount > 0, DiceError::InvalidStake);
    require!(
        (MIN_ROLL..=MAX_ROLL).contains(&roll),
        DiceError::InvalidThreshold
    );
    Ok(())
}

/// Gross amount owed to the player (stake included).
///
/// payout = amount * (10000 - edge) / roll / 100, truncated, or 0 when the
/// outcome lands above the chosen roll.
pub fn compute_payout(amount: u64, roll: u8, outcome: u8) -> Result<u64> {
    if outcome > roll {
        return Ok(0);
    }
    require!(roll >= MIN_ROLL, DiceError::InvalidThreshold);

    let payout = u128::from(amount)
        .checked_mul(BPS_DENOMINATOR - HOUSE_EDGE_BPS)
        .ok_or(DiceError::MathOverflow)?
        .checked_div(u128::from(roll))
        .ok_or(DiceError::MathOverflow)?
        .checked_div(ROLL_SCALE)
        .ok_or(DiceError::MathOverflow)?;

    u64::try_from(payout).map_err(|_| error!(DiceError::MathOverflow))
}

/// Largest amount a bet can ever draw from the pool: a win at its own roll.
pub fn max_payout(amount: u64, roll: u8) -> Result<u64> {
    compute_payout(amount, roll, roll)
}

/// Vault lamports the pool may actually spend. The rent-exempt floor stays behind.
pub fn available_liquidity(vault_lamports: u64, rent_floor: u64) -> u64 {
    vault_lamports.saturating_sub(rent_floor)
}

/// Point-in-time admission check. `available` is read before the stake is deposited.
pub fn ensure_liquidity(available: u64, amount: u64, roll: u8) -> Result<u64> {
    let exposure = max_payout(amount, roll)?;
    require!(available >= exposure, DiceError::InsufficientLiquidity);
    Ok(exposure)
}

/// Settlement-time check: other bets may have drained the pool since placement.
pub fn ensure_covers(available: u64, owed: u64) -> Result<()> {
    require!(available >= owed, DiceError::PoolUnderfunded);
    Ok(())
}

pub fn ensure_refund_window(placed_slot: u64, current_slot: u64) -> Result<()> {
    require!(
        current_slot >= placed_slot.saturating_add(REFUND_TIMEOUT_SLOTS),
        DiceError::TimeoutNotReached
    );
    Ok(())
}

pub fn settle(amount: u64, roll: u8, signature: &[u8; 64]) -> Result<Settlement> {
    let outcome = roll_from_signature(signature);
    let payout = compute_payout(amount, roll, outcome)?;
    Ok(Settlement { outcome, payout })
}
