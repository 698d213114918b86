use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{USER_VESTING_SEED, VAULT_SEED, VESTING_CONFIG_SEED};
use crate::error::VestingError;
use crate::state::{UserVesting, VestingConfig};
use crate::utils::time;
use crate::utils::vault::VaultAuthority;

pub(crate) fn handler(ctx: Context<Claim>) -> Result<()> {
    ctx.accounts
        .user_vesting
        .check_claimer(&ctx.accounts.user.key())?;

    let now = time::now_ts()?;
    let vault_balance = ctx.accounts.vault.amount;

    // Book first; the runtime rolls everything back if the transfer fails.
    let amount = {
        let config = &mut ctx.accounts.vesting_config;
        let user_vesting = &mut ctx.accounts.user_vesting;
        user_vesting.settle_claim(config, vault_balance, now)?
    };
    if amount == 0 {
        msg!("Nothing vested to claim at {}", now);
        return Ok(());
    }

    let authority = VaultAuthority::bind(&ctx.accounts.vesting_config, &ctx.accounts.vault)?;
    authority.release(
        &ctx.accounts.token_program,
        &ctx.accounts.mint,
        &ctx.accounts.vault,
        &ctx.accounts.user_ata,
        amount,
    )?;

    ctx.accounts.vault.reload()?;
    ctx.accounts
        .vesting_config
        .check_conservation(ctx.accounts.vault.amount)?;

    let user_vesting = &ctx.accounts.user_vesting;
    emit!(TokensClaimed {
        mint: ctx.accounts.mint.key(),
        beneficiary: user_vesting.beneficiary,
        amount,
        claimed_total: user_vesting.claimed_amount,
        total_allocation: user_vesting.total_allocation,
        timestamp: now,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Claim<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        seeds = [VESTING_CONFIG_SEED, mint.key().as_ref()],
        bump = vesting_config.bump,
        has_one = mint @ VestingError::NotFound,
        has_one = vault @ VestingError::InvalidTokenAccount,
    )]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vesting_config.key().as_ref()],
        bump = vesting_config.vault_bump,
        token::mint = mint,
        token::authority = vesting_config,
        token::token_program = token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [
            USER_VESTING_SEED,
            vesting_config.key().as_ref(),
            user_vesting.beneficiary.as_ref(),
        ],
        bump = user_vesting.bump,
        has_one = vesting_config @ VestingError::NotFound,
    )]
    pub user_vesting: Account<'info, UserVesting>,

    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = mint,
        associated_token::authority = user,
        associated_token::token_program = token_program,
    )]
    pub user_ata: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct TokensClaimed {
    pub mint: Pubkey,
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub claimed_total: u64,
    pub total_allocation: u64,
    pub timestamp: i64,
}
