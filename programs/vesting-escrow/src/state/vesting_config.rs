use anchor_lang::prelude::*;

use crate::constants::{VAULT_SEED, VESTING_CONFIG_SEED};
use crate::error::VestingError;
use crate::utils::curve::VestingWindow;

/// Vesting schedule for one mint. PDA: `[b"vesting_config", mint]`.
#[account]
#[derive(InitSpace, Default)]
pub struct VestingConfig {
    /// Vested token mint.
    pub mint: Pubkey,
    /// Creator; the holder that funded the vault.
    pub authority: Pubkey,
    /// Escrow token account, authority = this PDA.
    pub vault: Pubkey,
    pub start_time: i64,
    pub cliff_time: i64,
    pub end_time: i64,
    /// Amount escrowed into the vault at creation.
    pub total_amount: u64,
    /// Sum of every beneficiary's claimed amount.
    pub claimed_total: u64,
    pub bump: u8,
    pub vault_bump: u8,
}

/// Caller-supplied schedule parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleParams {
    pub start_time: i64,
    pub cliff_time: i64,
    pub end_time: i64,
    pub total_amount: u64,
}

impl VestingConfig {
    pub fn address(mint: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[VESTING_CONFIG_SEED, mint.as_ref()], &crate::ID)
    }

    pub fn vault_address(vesting_config: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[VAULT_SEED, vesting_config.as_ref()], &crate::ID)
    }

    /// Validates creation parameters and returns the curve window.
    pub fn check_params(
        start_time: i64,
        cliff_time: i64,
        end_time: i64,
        total_amount: u64,
    ) -> std::result::Result<VestingWindow, VestingError> {
        if total_amount == 0 {
            return Err(VestingError::InvalidSchedule);
        }
        VestingWindow::new(start_time, cliff_time, end_time)
    }

    /// The holder must cover the full escrow before anything is written.
    pub fn check_source_balance(
        source_balance: u64,
        total_amount: u64,
    ) -> std::result::Result<(), VestingError> {
        if source_balance < total_amount {
            return Err(VestingError::InsufficientFunds);
        }
        Ok(())
    }

    /// A zeroed record is what `init_if_needed` hands over for a fresh PDA.
    pub fn is_initialized(&self) -> bool {
        self.mint != Pubkey::default()
    }

    /// Fills a fresh record. Fails without touching `self` if the record is
    /// already live or the parameters are malformed.
    pub fn open(
        &mut self,
        mint: Pubkey,
        authority: Pubkey,
        vault: Pubkey,
        params: ScheduleParams,
        bump: u8,
        vault_bump: u8,
    ) -> std::result::Result<(), VestingError> {
        if self.is_initialized() {
            return Err(VestingError::AlreadyInitialized);
        }
        Self::check_params(
            params.start_time,
            params.cliff_time,
            params.end_time,
            params.total_amount,
        )?;

        *self = Self {
            mint,
            authority,
            vault,
            start_time: params.start_time,
            cliff_time: params.cliff_time,
            end_time: params.end_time,
            total_amount: params.total_amount,
            claimed_total: 0,
            bump,
            vault_bump,
        };
        Ok(())
    }

    /// After funding, the vault must hold exactly what was recorded.
    pub fn check_funded(&self, vault_balance: u64) -> std::result::Result<(), VestingError> {
        if vault_balance != self.total_amount {
            return Err(VestingError::VaultFundingMismatch);
        }
        Ok(())
    }

    /// Allocations are opened by the beneficiary itself or by the schedule authority.
    pub fn check_allocator(
        &self,
        payer: &Pubkey,
        beneficiary: &Pubkey,
    ) -> std::result::Result<(), VestingError> {
        if payer != beneficiary && *payer != self.authority {
            return Err(VestingError::Unauthorized);
        }
        Ok(())
    }

    pub fn window(&self) -> VestingWindow {
        VestingWindow {
            start_time: self.start_time,
            cliff_time: self.cliff_time,
            end_time: self.end_time,
        }
    }

    /// Amount that has not left the vault through claims.
    pub fn outstanding(&self) -> u64 {
        self.total_amount.saturating_sub(self.claimed_total)
    }

    /// `vault_balance + claimed_total` must still cover `total_amount`.
    /// Surplus (tokens sent to the vault from outside) is tolerated.
    pub fn check_conservation(&self, vault_balance: u64) -> std::result::Result<(), VestingError> {
        let accounted = (vault_balance as u128)
            .checked_add(self.claimed_total as u128)
            .ok_or(VestingError::MathOverflow)?;
        if accounted < self.total_amount as u128 {
            return Err(VestingError::InsufficientVaultBalance);
        }
        Ok(())
    }
}
