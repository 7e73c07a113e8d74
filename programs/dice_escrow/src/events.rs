use anchor_lang::prelude::*;

#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub house: Pubkey,
    pub vault: Pubkey,
    pub amount: u64,
}

#[event]
pub struct BetPlaced {
    pub bet: Pubkey,
    pub player: Pubkey,
    pub pool: Pubkey,
    pub seed: u128,
    pub amount: u64,
    pub roll: u8,
    pub slot: u64,
}

#[event]
pub struct BetResolved {
    pub bet: Pubkey,
    pub player: Pubkey,
    pub roll: u8,
    pub outcome: u8,
    pub won: bool,
    pub payout: u64,
}

#[event]
pub struct BetRefunded {
    pub bet: Pubkey,
    pub player: Pubkey,
    pub amount: u64,
    pub slot: u64,
}
