use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{DISCRIMINATOR_LEN, VAULT_SEED, VESTING_CONFIG_SEED};
use crate::error::VestingError;
use crate::state::{ScheduleParams, VestingConfig};
use crate::utils::{accounts, vault};

pub(crate) fn handler(
    ctx: Context<InitializeVesting>,
    start_time: i64,
    cliff_time: i64,
    end_time: i64,
    total_amount: u64,
) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let mint_key = ctx.accounts.mint.key();
    let vault_key = ctx.accounts.vault.key();

    // Nothing persists unless the whole instruction succeeds.
    ctx.accounts.vesting_config.open(
        mint_key,
        authority,
        vault_key,
        ScheduleParams {
            start_time,
            cliff_time,
            end_time,
            total_amount,
        },
        ctx.bumps.vesting_config,
        ctx.bumps.vault,
    )?;

    let expected_ata =
        accounts::holding_account(&authority, &mint_key, &ctx.accounts.token_program.key());
    require_keys_eq!(
        ctx.accounts.authority_ata.key(),
        expected_ata,
        VestingError::InvalidTokenAccount
    );
    VestingConfig::check_source_balance(ctx.accounts.authority_ata.amount, total_amount)?;

    vault::fund_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.mint,
        &ctx.accounts.authority_ata,
        &ctx.accounts.vault,
        &ctx.accounts.authority,
        total_amount,
    )?;

    // Fee-bearing mints would escrow less than recorded.
    ctx.accounts.vault.reload()?;
    ctx.accounts
        .vesting_config
        .check_funded(ctx.accounts.vault.amount)?;

    emit!(VestingInitialized {
        mint: mint_key,
        authority,
        vault: vault_key,
        start_time,
        cliff_time,
        end_time,
        total_amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeVesting<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    // init_if_needed so a second call reaches the handler and fails with
    // AlreadyInitialized instead of a system-program "account in use".
    #[account(
        init_if_needed,
        payer = authority,
        space = DISCRIMINATOR_LEN + VestingConfig::INIT_SPACE,
        seeds = [VESTING_CONFIG_SEED, mint.key().as_ref()],
        bump
    )]
    pub vesting_config: Box<Account<'info, VestingConfig>>,

    #[account(
        init_if_needed,
        payer = authority,
        token::mint = mint,
        token::authority = vesting_config,
        token::token_program = token_program,
        seeds = [VAULT_SEED, vesting_config.key().as_ref()],
        bump
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub authority_ata: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct VestingInitialized {
    pub mint: Pubkey,
    pub authority: Pubkey,
    pub vault: Pubkey,
    pub start_time: i64,
    pub cliff_time: i64,
    pub end_time: i64,
    pub total_amount: u64,
}
