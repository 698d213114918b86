use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

use crate::constants::{DISCRIMINATOR_LEN, USER_VESTING_SEED, VESTING_CONFIG_SEED};
use crate::error::VestingError;
use crate::state::{UserVesting, VestingConfig};

/// Opens `beneficiary`'s allocation under the mint's schedule.
///
/// The sum of allocations is not capped at the schedule's `total_amount`;
/// claims are served first come, first served until the vault runs dry.
pub(crate) fn handler(
    ctx: Context<InitializeUserVesting>,
    beneficiary: Pubkey,
    total_allocation: u64,
) -> Result<()> {
    let payer = ctx.accounts.payer.key();
    ctx.accounts
        .vesting_config
        .check_allocator(&payer, &beneficiary)?;

    let vesting_config = ctx.accounts.vesting_config.key();
    ctx.accounts.user_vesting.open(
        vesting_config,
        beneficiary,
        total_allocation,
        ctx.bumps.user_vesting,
    )?;

    emit!(UserVestingInitialized {
        vesting_config,
        beneficiary,
        payer,
        total_allocation,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(beneficiary: Pubkey)]
pub struct InitializeUserVesting<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        seeds = [VESTING_CONFIG_SEED, mint.key().as_ref()],
        bump = vesting_config.bump,
        has_one = mint @ VestingError::NotFound,
    )]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(
        init_if_needed,
        payer = payer,
        space = DISCRIMINATOR_LEN + UserVesting::INIT_SPACE,
        seeds = [USER_VESTING_SEED, vesting_config.key().as_ref(), beneficiary.as_ref()],
        bump
    )]
    pub user_vesting: Account<'info, UserVesting>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct UserVestingInitialized {
    pub vesting_config: Pubkey,
    pub beneficiary: Pubkey,
    pub payer: Pubkey,
    pub total_allocation: u64,
}
