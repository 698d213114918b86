use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{self, Mint, MintTo, TokenAccount, TokenInterface};

use crate::error::VestingError;

pub(crate) fn handler(ctx: Context<CreateToken>, decimals: u8, initial_supply: u64) -> Result<()> {
    let amount = base_units(initial_supply, decimals)?;

    token_interface::mint_to(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.user_ata.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(TokenCreated {
        mint: ctx.accounts.mint.key(),
        authority: ctx.accounts.user.key(),
        holding_account: ctx.accounts.user_ata.key(),
        decimals,
        amount,
    });

    Ok(())
}

/// `whole_tokens * 10^decimals`.
pub fn base_units(whole_tokens: u64, decimals: u8) -> Result<u64> {
    let scale = 10u64
        .checked_pow(decimals as u32)
        .ok_or(VestingError::MathOverflow)?;
    let amount = whole_tokens
        .checked_mul(scale)
        .ok_or(VestingError::MathOverflow)?;
    Ok(amount)
}

#[derive(Accounts)]
#[instruction(decimals: u8)]
pub struct CreateToken<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        init,
        payer = user,
        mint::decimals = decimals,
        mint::authority = user,
        mint::freeze_authority = user,
        mint::token_program = token_program,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = user,
        associated_token::mint = mint,
        associated_token::authority = user,
        associated_token::token_program = token_program,
    )]
    pub user_ata: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct TokenCreated {
    pub mint: Pubkey,
    pub authority: Pubkey,
    pub holding_account: Pubkey,
    pub decimals: u8,
    pub amount: u64,
}
