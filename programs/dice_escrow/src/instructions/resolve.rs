use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions::{
    load_current_index_checked, load_instruction_at_checked,
};
use anchor_lang::solana_program::{program::invoke_signed, system_instruction};

use crate::{
    events::BetResolved,
    utils::{verify_preceding_ed25519, VAULT_SEED},
    ResolveBet,
};

pub fn resolve_bet(ctx: Context<ResolveBet>, signature: [u8; 64]) -> Result<()> {
    let bet = &ctx.accounts.bet;
    let pool = &mut ctx.accounts.pool;

    // --- ed25519 introspection ---
    let ix_sys = ctx.accounts.instructions.to_account_info();
    let current_ix = load_current_index_checked(&ix_sys)?;
    verify_preceding_ed25519(
        current_ix,
        |index| load_instruction_at_checked(index, &ix_sys),
        &pool.house,
        &bet.message(),
        &signature,
    )?;

    // --- outcome ---
    let rent_floor = Rent::get()?.minimum_balance(0);
    let vault_lamports = ctx.accounts.vault.to_account_info().lamports();
    let settlement = pool.settle_bet(vault_lamports, rent_floor, bet, &signature)?;

    if settlement.won() {
        let ix = system_instruction::transfer(
            &ctx.accounts.vault.key(),
            &ctx.accounts.player.key(),
            settlement.payout,
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
    }

    msg!(
        "Bet resolved: roll {} outcome {} payout {}",
        bet.roll,
        settlement.outcome,
        settlement.payout
    );

    emit!(BetResolved {
        bet: bet.key(),
        player: bet.player,
        roll: bet.roll,
        outcome: settlement.outcome,
        won: settlement.won(),
        payout: settlement.payout,
    });

    // bet PDA is closed to the player by the `close` constraint in context.
    Ok(())
}
