use anchor_lang::prelude::*;

/// Custom error codes for the vesting escrow program.
#[error_code]
pub enum VestingError {
    #[msg("Account is already initialized")]
    AlreadyInitialized,

    #[msg("Invalid schedule: requires start <= cliff <= end and a non-zero total")]
    InvalidSchedule,

    #[msg("Vesting record not found for this schedule")]
    NotFound,

    #[msg("Unauthorized: signer may not act on this record")]
    Unauthorized,

    #[msg("Insufficient funds in source token account")]
    InsufficientFunds,

    #[msg("Insufficient vault balance")]
    InsufficientVaultBalance,

    #[msg("Vault balance does not match the escrowed total after funding")]
    VaultFundingMismatch,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Math overflow")]
    MathOverflow,
}
