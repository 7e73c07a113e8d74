use anchor_lang::prelude::*;

use crate::{
    constants::INITIAL_VERSION,
    errors::DiceError,
    math::{
        available_liquidity, ensure_covers, ensure_liquidity, ensure_refund_window, settle,
        validate_bet_params, Settlement,
    },
};

/// Length of the message the house signs for a bet.
pub const BET_MESSAGE_LEN: usize = 32 + 16 + 8 + 1 + 8;

#[account]
#[derive(InitSpace)]
pub struct Pool {
    pub house: Pubkey,
    pub bump: u8,

    // System-owned PDA vault (holds lamports, no data)
    pub vault: Pubkey,
    pub vault_bump: u8,

    pub created_slot: u64,
    pub initial_funding: u64,

    pub open_bets: u64,
    /// Stakes of open bets. They sit in the vault but are owed back on refund,
    /// so they never count as bankroll.
    pub locked_stakes: u64,

    pub total_wagered: u64,
    pub total_paid_out: u64,
    pub total_refunded: u64,

    pub version: u16,
}

impl Pool {
    pub fn new(
        house: Pubkey,
        bump: u8,
        vault: Pubkey,
        vault_bump: u8,
        created_slot: u64,
        initial_funding: u64,
    ) -> Result<Self> {
        require!(initial_funding > 0, DiceError::InvalidFunding);

        Ok(Self {
            house,
            bump,
            vault,
            vault_bump,
            created_slot,
            initial_funding,
            open_bets: 0,
            locked_stakes: 0,
            total_wagered: 0,
            total_paid_out: 0,
            total_refunded: 0,
            version: INITIAL_VERSION,
        })
    }

    /// Vault lamports free to back payouts: above the rent floor and not locked by open bets.
    pub fn spendable(&self, vault_lamports: u64, rent_floor: u64) -> u64 {
        available_liquidity(vault_lamports, rent_floor).saturating_sub(self.locked_stakes)
    }

    /// Admits a new stake. `vault_lamports` is read before the stake is deposited.
    pub fn admit_bet(
        &mut self,
        vault_lamports: u64,
        rent_floor: u64,
        amount: u64,
        roll: u8,
    ) -> Result<()> {
        validate_bet_params(amount, roll)?;
        ensure_liquidity(self.spendable(vault_lamports, rent_floor), amount, roll)?;

        self.open_bets = self
            .open_bets
            .checked_add(1)
            .ok_or_else(|| error!(DiceError::MathOverflow))?;
        self.locked_stakes = self
            .locked_stakes
            .checked_add(amount)
            .ok_or_else(|| error!(DiceError::MathOverflow))?;
        self.total_wagered = self
            .total_wagered
            .checked_add(amount)
            .ok_or_else(|| error!(DiceError::MathOverflow))?;
        Ok(())
    }

    /// Settles `bet` and releases its stake. The caller pays out `payout` from the vault.
    pub fn settle_bet(
        &mut self,
        vault_lamports: u64,
        rent_floor: u64,
        bet: &Bet,
        signature: &[u8; 64],
    ) -> Result<Settlement> {
        let settlement = settle(bet.amount, bet.roll, signature)?;

        if settlement.won() {
            // the winner's own stake is part of what it is owed
            let cover = self
                .spendable(vault_lamports, rent_floor)
                .checked_add(bet.amount)
                .ok_or_else(|| error!(DiceError::MathOverflow))?;
            ensure_covers(cover, settlement.payout)?;
        }

        self.release_stake(bet.amount)?;
        self.total_paid_out = self
            .total_paid_out
            .checked_add(settlement.payout)
            .ok_or_else(|| error!(DiceError::MathOverflow))?;

        Ok(settlement)
    }

    /// Releases a timed-out stake and returns the amount owed back to the player.
    pub fn refund_bet(&mut self, bet: &Bet, current_slot: u64) -> Result<u64> {
        ensure_refund_window(bet.slot, current_slot)?;

        self.release_stake(bet.amount)?;
        self.total_refunded = self
            .total_refunded
            .checked_add(bet.amount)
            .ok_or_else(|| error!(DiceError::MathOverflow))?;

        Ok(bet.amount)
    }

    fn release_stake(&mut self, amount: u64) -> Result<()> {
        self.open_bets = self
            .open_bets
            .checked_sub(1)
            .ok_or_else(|| error!(DiceError::MathOverflow))?;
        self.locked_stakes = self
            .locked_stakes
            .checked_sub(amount)
            .ok_or_else(|| error!(DiceError::MathOverflow))?;
        Ok(())
    }
}

#[account]
#[derive(InitSpace)]
pub struct Bet {
    pub player: Pubkey,
    pub pool: Pubkey,
    pub seed: u128,
    /// Slot the bet was placed at. Bound into the signed message.
    pub slot: u64,
    pub roll: u8,
    pub amount: u64,
    pub bump: u8,
}

impl Bet {
    /// Canonical bytes the house signs off-chain:
    /// player ∥ seed (LE) ∥ slot (LE) ∥ roll ∥ amount (LE)
    pub fn message(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(BET_MESSAGE_LEN);
        data.extend_from_slice(self.player.as_ref());
        data.extend_from_slice(&self.seed.to_le_bytes());
        data.extend_from_slice(&self.slot.to_le_bytes());
        data.push(self.roll);
        data.extend_from_slice(&self.amount.to_le_bytes());
        data
    }

    /// A freshly created account is zeroed, so an open bet always has a player.
    pub fn is_open(&self) -> bool {
        self.player != Pubkey::default()
    }

    pub fn ensure_fresh(&self) -> Result<()> {
        require!(!self.is_open(), DiceError::DuplicateSeed);
        Ok(())
    }
}
