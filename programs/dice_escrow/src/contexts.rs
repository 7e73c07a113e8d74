// programs/dice_escrow/src/contexts.rs

use anchor_lang::prelude::*;

use crate::errors::DiceError;
use crate::state::{Bet, Pool};

#[derive(Accounts)]
pub struct InitializePool<'info> {
    #[account(
        init,
        payer = house,
        space = 8 + Pool::INIT_SPACE,
        seeds = [crate::POOL_SEED, house.key().as_ref()],
        bump
    )]
    pub pool: Account<'info, Pool>,

    /// CHECK: system-owned vault PDA, holds lamports, no data
    #[account(
        init,
        payer = house,
        space = 0,
        owner = anchor_lang::solana_program::system_program::ID,
        seeds = [crate::VAULT_SEED, house.key().as_ref()],
        bump
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub house: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(seed: u128)]
pub struct PlaceBet<'info> {
    #[account(mut)]
    pub player: Signer<'info>,

    /// CHECK: only used as a seed; pool.house is checked through has_one.
    pub house: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [crate::POOL_SEED, house.key().as_ref()],
        bump = pool.bump,
        has_one = house,
        has_one = vault,
    )]
    pub pool: Account<'info, Pool>,

    /// CHECK: System-owned PDA used only as a lamport vault. Address is enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::VAULT_SEED, house.key().as_ref()],
        bump = pool.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,

    // init_if_needed so a reused seed surfaces as DuplicateSeed instead of a
    // system program "already in use" failure
    #[account(
        init_if_needed,
        payer = player,
        space = 8 + Bet::INIT_SPACE,
        seeds = [crate::BET_SEED, vault.key().as_ref(), seed.to_le_bytes().as_ref()],
        bump
    )]
    pub bet: Account<'info, Bet>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ResolveBet<'info> {
    #[account(mut)]
    pub house: Signer<'info>,

    /// CHECK: receiver of payout and bet rent. Must match bet.player.
    #[account(mut)]
    pub player: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [crate::POOL_SEED, house.key().as_ref()],
        bump = pool.bump,
        has_one = house,
        has_one = vault,
    )]
    pub pool: Account<'info, Pool>,

    /// CHECK: System-owned PDA vault. Address enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::VAULT_SEED, house.key().as_ref()],
        bump = pool.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [crate::BET_SEED, vault.key().as_ref(), bet.seed.to_le_bytes().as_ref()],
        bump = bet.bump,
        has_one = player @ DiceError::InvalidPlayer,
        has_one = pool,
        close = player
    )]
    pub bet: Account<'info, Bet>,

    /// CHECK: instruction sysvar (for ed25519 introspection). Address enforced.
    #[account(address = anchor_lang::solana_program::sysvar::instructions::ID)]
    pub instructions: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct RefundBet<'info> {
    #[account(mut)]
    pub player: Signer<'info>,

    /// CHECK: only used as a seed; pool.house is checked through has_one.
    pub house: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [crate::POOL_SEED, house.key().as_ref()],
        bump = pool.bump,
        has_one = house,
        has_one = vault,
    )]
    pub pool: Account<'info, Pool>,

    /// CHECK: System-owned PDA vault. Address enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::VAULT_SEED, house.key().as_ref()],
        bump = pool.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [crate::BET_SEED, vault.key().as_ref(), bet.seed.to_le_bytes().as_ref()],
        bump = bet.bump,
        has_one = player @ DiceError::InvalidPlayer,
        has_one = pool,
        close = player
    )]
    pub bet: Account<'info, Bet>,

    pub system_program: Program<'info, System>,
}
