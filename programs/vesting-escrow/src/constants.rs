//! Program-wide constants.

/// Seed of the per-mint vesting schedule PDA: `[VESTING_CONFIG_SEED, mint]`.
pub const VESTING_CONFIG_SEED: &[u8] = b"vesting_config";

/// Seed of the escrow vault token account: `[VAULT_SEED, vesting_config]`.
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed of a beneficiary allocation: `[USER_VESTING_SEED, vesting_config, beneficiary]`.
pub const USER_VESTING_SEED: &[u8] = b"user_vesting";

/// Anchor account discriminator prefix.
pub const DISCRIMINATOR_LEN: usize = 8;
