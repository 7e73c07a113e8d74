use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke, system_instruction};

use crate::{events::BetPlaced, state::Bet, PlaceBet};

pub fn place_bet(ctx: Context<PlaceBet>, seed: u128, amount: u64, roll: u8) -> Result<()> {
    // zeroed => created by this instruction
    ctx.accounts.bet.ensure_fresh()?;

    // Admission check against the unlocked bankroll, before our own stake lands in it.
    let rent_floor = Rent::get()?.minimum_balance(0);
    let vault_lamports = ctx.accounts.vault.to_account_info().lamports();
    ctx.accounts
        .pool
        .admit_bet(vault_lamports, rent_floor, amount, roll)?;

    let current_slot = Clock::get()?.slot;
    let player_pk = ctx.accounts.player.key();
    let pool_pk = ctx.accounts.pool.key();

    ctx.accounts.bet.set_inner(Bet {
        player: player_pk,
        pool: pool_pk,
        seed,
        slot: current_slot,
        roll,
        amount,
        bump: ctx.bumps.bet,
    });

    // --- TRANSFER stake to vault ---
    let ix = system_instruction::transfer(&player_pk, &ctx.accounts.vault.key(), amount);
    invoke(
        &ix,
        &[
            ctx.accounts.player.to_account_info(),
            ctx.accounts.vault.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
        ],
    )?;

    emit!(BetPlaced {
        bet: ctx.accounts.bet.key(),
        player: player_pk,
        pool: pool_pk,
        seed,
        amount,
        roll,
        slot: current_slot,
    });

    Ok(())
}
