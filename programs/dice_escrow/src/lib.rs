use anchor_lang::prelude::*;

pub mod constants;
pub mod contexts;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;
pub mod utils;

pub use constants::*;
pub use contexts::*;
pub use errors::*;
pub use events::*;
pub use instructions::*;
pub use state::*;
pub use utils::*;

declare_id!("EdtFxZgVGTbVkHbChGm2bP2F74ntnqUfqA9jTUihBdjx");

#[program]
pub mod dice_escrow {
    use super::*;
    use crate::instructions::{bet, pool, refund, resolve};

    pub fn initialize_pool(ctx: Context<InitializePool>, amount: u64) -> Result<()> {
        pool::initialize_pool(ctx, amount)
    }

    pub fn place_bet(ctx: Context<PlaceBet>, seed: u128, amount: u64, roll: u8) -> Result<()> {
        bet::place_bet(ctx, seed, amount, roll)
    }

    pub fn resolve_bet(ctx: Context<ResolveBet>, signature: [u8; 64]) -> Result<()> {
        resolve::resolve_bet(ctx, signature)
    }

    pub fn refund_bet(ctx: Context<RefundBet>) -> Result<()> {
        refund::refund_bet(ctx)
    }
}
