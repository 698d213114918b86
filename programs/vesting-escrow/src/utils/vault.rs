use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};

use crate::constants::VESTING_CONFIG_SEED;
use crate::error::VestingError;
use crate::state::VestingConfig;

/// Moves `amount` from a user-held token account into the escrow vault.
/// Signed by the holder, not by the program.
pub fn fund_vault<'info>(
    token_program: &Interface<'info, TokenInterface>,
    mint: &InterfaceAccount<'info, Mint>,
    from: &InterfaceAccount<'info, TokenAccount>,
    vault: &InterfaceAccount<'info, TokenAccount>,
    holder: &Signer<'info>,
    amount: u64,
) -> Result<()> {
    token_interface::transfer_checked(
        CpiContext::new(
            token_program.to_account_info(),
            TransferChecked {
                from: from.to_account_info(),
                mint: mint.to_account_info(),
                to: vault.to_account_info(),
                authority: holder.to_account_info(),
            },
        ),
        amount,
        mint.decimals,
    )
}

/// Signing capability over one schedule's vault.
///
/// The vault's token authority is the schedule PDA, so debits need the
/// schedule's signer seeds. Those seeds are only produced here, and only for
/// a vault that `bind` has matched against the schedule record.
pub struct VaultAuthority<'a, 'info> {
    config: &'a Account<'info, VestingConfig>,
}

impl<'a, 'info> VaultAuthority<'a, 'info> {
    pub fn bind(
        config: &'a Account<'info, VestingConfig>,
        vault: &InterfaceAccount<'info, TokenAccount>,
    ) -> Result<Self> {
        require_keys_eq!(vault.key(), config.vault, VestingError::InvalidTokenAccount);
        require_keys_eq!(vault.owner, config.key(), VestingError::InvalidTokenAccount);
        require_keys_eq!(vault.mint, config.mint, VestingError::InvalidTokenAccount);
        Ok(Self { config })
    }

    /// Transfers `amount` from the bound vault to `destination`.
    pub fn release(
        &self,
        token_program: &Interface<'info, TokenInterface>,
        mint: &InterfaceAccount<'info, Mint>,
        vault: &InterfaceAccount<'info, TokenAccount>,
        destination: &InterfaceAccount<'info, TokenAccount>,
        amount: u64,
    ) -> Result<()> {
        require_keys_eq!(vault.key(), self.config.vault, VestingError::InvalidTokenAccount);

        let mint_key = self.config.mint;
        let bump = [self.config.bump];
        let signer_seeds: &[&[&[u8]]] = &[&[VESTING_CONFIG_SEED, mint_key.as_ref(), &bump]];

        token_interface::transfer_checked(
            CpiContext::new_with_signer(
                token_program.to_account_info(),
                TransferChecked {
                    from: vault.to_account_info(),
                    mint: mint.to_account_info(),
                    to: destination.to_account_info(),
                    authority: self.config.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
            mint.decimals,
        )
    }
}
