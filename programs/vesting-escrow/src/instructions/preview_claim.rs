use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

use crate::constants::{USER_VESTING_SEED, VESTING_CONFIG_SEED};
use crate::error::VestingError;
use crate::state::{AllocationStatus, UserVesting, VestingConfig};
use crate::utils::time;

/// Read-only evaluation of what `claim` would pay out right now.
/// Returns the claimable amount as instruction return data.
pub(crate) fn handler(ctx: Context<PreviewClaim>) -> Result<u64> {
    let now = time::now_ts()?;
    let config = &ctx.accounts.vesting_config;
    let user_vesting = &ctx.accounts.user_vesting;
    let quote = user_vesting.quote(config, now)?;

    emit!(ClaimPreview {
        beneficiary: user_vesting.beneficiary,
        timestamp: now,
        unlocked: quote.unlocked,
        claimed: quote.claimed,
        claimable: quote.claimable,
        fully_claimed: user_vesting.status() == AllocationStatus::FullyClaimed,
        schedule_outstanding: config.outstanding(),
    });

    Ok(quote.claimable)
}

#[derive(Accounts)]
pub struct PreviewClaim<'info> {
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        seeds = [VESTING_CONFIG_SEED, mint.key().as_ref()],
        bump = vesting_config.bump,
        has_one = mint @ VestingError::NotFound,
    )]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(
        seeds = [
            USER_VESTING_SEED,
            vesting_config.key().as_ref(),
            user_vesting.beneficiary.as_ref(),
        ],
        bump = user_vesting.bump,
        has_one = vesting_config @ VestingError::NotFound,
    )]
    pub user_vesting: Account<'info, UserVesting>,
}

#[event]
pub struct ClaimPreview {
    pub beneficiary: Pubkey,
    pub timestamp: i64,
    pub unlocked: u64,
    pub claimed: u64,
    pub claimable: u64,
    pub fully_claimed: bool,
    /// Schedule-wide amount not yet paid out to any beneficiary.
    pub schedule_outstanding: u64,
}
