use anchor_lang::prelude::*;

#[error_code]
pub enum DiceError {
    #[msg("Roll must be between 1 and 99")]
    InvalidThreshold,
    #[msg("Stake must be greater than zero")]
    InvalidStake,
    #[msg("Initial pool funding must be greater than zero")]
    InvalidFunding,
    #[msg("A bet with this seed is already open")]
    DuplicateSeed,
    #[msg("Pool cannot cover the maximum payout")]
    InsufficientLiquidity,

    #[msg("Missing or invalid ed25519 verify instruction for this bet")]
    SignatureNotVerified,

    #[msg("Pool balance cannot cover this settlement")]
    PoolUnderfunded,
    #[msg("Time not reached yet")]
    TimeoutNotReached,

    #[msg("Player of bet did not match")]
    InvalidPlayer,
    #[msg("Math overflow")]
    MathOverflow,
}
