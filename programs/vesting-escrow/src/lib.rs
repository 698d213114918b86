use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

pub use instructions::*;

declare_id!("4W3Yooqzfkoc4c7Fg9ySSJGcas4dEMswXU8UojrcBXbS");

#[program]
pub mod vesting_escrow {
    use super::*;

    /// Creates a mint and mints `initial_supply` whole tokens to the caller.
    pub fn create_token(ctx: Context<CreateToken>, decimals: u8, initial_supply: u64) -> Result<()> {
        instructions::create_token::handler(ctx, decimals, initial_supply)
    }

    /// Creates the mint's schedule and escrows `total_amount` into its vault.
    pub fn initialize_vesting(
        ctx: Context<InitializeVesting>,
        start_time: i64,
        cliff_time: i64,
        end_time: i64,
        total_amount: u64,
    ) -> Result<()> {
        instructions::initialize_vesting::handler(
            ctx,
            start_time,
            cliff_time,
            end_time,
            total_amount,
        )
    }

    pub fn initialize_user_vesting(
        ctx: Context<InitializeUserVesting>,
        beneficiary: Pubkey,
        total_allocation: u64,
    ) -> Result<()> {
        instructions::initialize_user_vesting::handler(ctx, beneficiary, total_allocation)
    }

    /// Releases whatever has vested since the last claim.
    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        instructions::claim::handler(ctx)
    }

    pub fn preview_claim(ctx: Context<PreviewClaim>) -> Result<u64> {
        instructions::preview_claim::handler(ctx)
    }
}
