use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke_signed, system_instruction};

use crate::{events::BetRefunded, utils::VAULT_SEED, RefundBet};

/// Liveness escape hatch: the house never signed, so the player takes the stake back.
pub fn refund_bet(ctx: Context<RefundBet>) -> Result<()> {
    let current_slot = Clock::get()?.slot;

    let bet = &ctx.accounts.bet;
    let pool = &mut ctx.accounts.pool;

    // The stake stayed locked while the bet was open, so the vault still holds it.
    let amount = pool.refund_bet(bet, current_slot)?;

    // Refund: Transfer stake from vault -> player. Rent is handled by `close`.
    let ix = system_instruction::transfer(
        &ctx.accounts.vault.key(),
        &ctx.accounts.player.key(),
        amount,
    );

    let house_key = pool.house;
    let signer_seeds: &[&[u8]] = &[VAULT_SEED, house_key.as_ref(), &[pool.vault_bump]];

    invoke_signed(
        &ix,
        &[
            ctx.accounts.vault.to_account_info(),
            ctx.accounts.player.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
        ],
        &[signer_seeds],
    )?;

    emit!(BetRefunded {
        bet: bet.key(),
        player: bet.player,
        amount,
        slot: current_slot,
    });

    Ok(())
}
