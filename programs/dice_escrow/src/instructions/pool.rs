use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke, system_instruction};

use crate::events::PoolInitialized;
use crate::state::Pool;
use crate::InitializePool;

/// Creates the house pool and seeds its vault with the initial bankroll.
pub fn initialize_pool(ctx: Context<InitializePool>, amount: u64) -> Result<()> {
    let current_slot = Clock::get()?.slot;

    let house_pk = ctx.accounts.house.key();
    let vault_pk = ctx.accounts.vault.key();

    ctx.accounts.pool.set_inner(Pool::new(
        house_pk,
        ctx.bumps.pool,
        vault_pk,
        ctx.bumps.vault,
        current_slot,
        amount,
    )?);

    // vault already holds its rent-exempt floor from `init`; this is the bankroll
    let ix = system_instruction::transfer(&house_pk, &vault_pk, amount);

    invoke(
        &ix,
        &[
            ctx.accounts.house.to_account_info(),
            ctx.accounts.vault.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
        ],
    )?;

    emit!(PoolInitialized {
        pool: ctx.accounts.pool.key(),
        house: house_pk,
        vault: vault_pk,
        amount,
    });

    Ok(())
}
