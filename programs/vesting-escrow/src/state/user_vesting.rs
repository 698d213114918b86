use anchor_lang::prelude::*;

use crate::constants::USER_VESTING_SEED;
use crate::error::VestingError;
use crate::state::VestingConfig;
use crate::utils::curve::ClaimQuote;

/// One beneficiary's allocation under a schedule.
/// PDA: `[b"user_vesting", vesting_config, beneficiary]`.
#[account]
#[derive(InitSpace, Default)]
pub struct UserVesting {
    pub vesting_config: Pubkey,
    pub beneficiary: Pubkey,
    pub total_allocation: u64,
    /// Monotonic; never exceeds `total_allocation`.
    pub claimed_amount: u64,
    pub bump: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocationStatus {
    Active,
    FullyClaimed,
}

impl UserVesting {
    pub fn address(vesting_config: &Pubkey, beneficiary: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[USER_VESTING_SEED, vesting_config.as_ref(), beneficiary.as_ref()],
            &crate::ID,
        )
    }

    pub fn is_initialized(&self) -> bool {
        self.vesting_config != Pubkey::default()
    }

    /// Fills a fresh allocation with nothing claimed yet. A live record is
    /// never reset.
    pub fn open(
        &mut self,
        vesting_config: Pubkey,
        beneficiary: Pubkey,
        total_allocation: u64,
        bump: u8,
    ) -> std::result::Result<(), VestingError> {
        if self.is_initialized() {
            return Err(VestingError::AlreadyInitialized);
        }
        *self = Self {
            vesting_config,
            beneficiary,
            total_allocation,
            claimed_amount: 0,
            bump,
        };
        Ok(())
    }

    /// Only the allocation's own beneficiary may claim it.
    pub fn check_claimer(&self, caller: &Pubkey) -> std::result::Result<(), VestingError> {
        if *caller != self.beneficiary {
            return Err(VestingError::Unauthorized);
        }
        Ok(())
    }

    pub fn status(&self) -> AllocationStatus {
        if self.claimed_amount >= self.total_allocation {
            AllocationStatus::FullyClaimed
        } else {
            AllocationStatus::Active
        }
    }

    pub fn quote(
        &self,
        config: &VestingConfig,
        now: i64,
    ) -> std::result::Result<ClaimQuote, VestingError> {
        config
            .window()
            .quote(self.total_allocation, self.claimed_amount, now)
    }

    /// Books the claim due at `now` against this allocation and its schedule.
    ///
    /// Returns the amount the caller must move out of the vault. Zero means
    /// nothing new is unlocked and neither record was touched. Both records
    /// are written only after every check has passed.
    pub fn settle_claim(
        &mut self,
        config: &mut VestingConfig,
        vault_balance: u64,
        now: i64,
    ) -> std::result::Result<u64, VestingError> {
        let quote = self.quote(config, now)?;
        if quote.claimable == 0 {
            return Ok(0);
        }
        if vault_balance < quote.claimable {
            return Err(VestingError::InsufficientVaultBalance);
        }

        let claimed_amount = self
            .claimed_amount
            .checked_add(quote.claimable)
            .ok_or(VestingError::MathOverflow)?;
        if claimed_amount > self.total_allocation {
            return Err(VestingError::MathOverflow);
        }
        let claimed_total = config
            .claimed_total
            .checked_add(quote.claimable)
            .ok_or(VestingError::MathOverflow)?;

        self.claimed_amount = claimed_amount;
        config.claimed_total = claimed_total;
        Ok(quote.claimable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: u64 = 1_000_000_000;
    const TOTAL: u64 = 100_000 * UNIT;
    const ALLOCATION: u64 = 50_000 * UNIT;
    const NOW: i64 = 1_760_000_000;

    /// Schedule plus a simulated vault balance.
    struct Escrow {
        config: VestingConfig,
        vault: u64,
    }

    impl Escrow {
        fn new(start_time: i64, cliff_time: i64, end_time: i64, total_amount: u64) -> Self {
            VestingConfig::check_params(start_time, cliff_time, end_time, total_amount).unwrap();
            Self {
                config: VestingConfig {
                    mint: Pubkey::new_unique(),
                    authority: Pubkey::new_unique(),
                    vault: Pubkey::new_unique(),
                    start_time,
                    cliff_time,
                    end_time,
                    total_amount,
                    ..Default::default()
                },
                vault: total_amount,
            }
        }

        fn allocate(&self, total_allocation: u64) -> UserVesting {
            UserVesting {
                vesting_config: Pubkey::new_unique(),
                beneficiary: Pubkey::new_unique(),
                total_allocation,
                claimed_amount: 0,
                bump: 255,
            }
        }

        fn claim(&mut self, alloc: &mut UserVesting, now: i64) -> u64 {
            let amount = alloc.settle_claim(&mut self.config, self.vault, now).unwrap();
            self.vault -= amount;
            self.config.check_conservation(self.vault).unwrap();
            amount
        }

        fn conserved(&self, allocs: &[&UserVesting]) -> bool {
            let claimed: u64 = allocs.iter().map(|a| a.claimed_amount).sum();
            claimed == self.config.claimed_total
                && self.vault + claimed == self.config.total_amount
        }
    }

    #[test]
    fn fully_elapsed_schedule_pays_once() {
        let mut escrow = Escrow::new(NOW - 100, NOW - 50, NOW - 10, TOTAL);
        let mut alloc = escrow.allocate(ALLOCATION);

        assert_eq!(escrow.claim(&mut alloc, NOW), ALLOCATION);
        assert_eq!(alloc.claimed_amount, ALLOCATION);
        assert_eq!(alloc.status(), AllocationStatus::FullyClaimed);

        assert_eq!(escrow.claim(&mut alloc, NOW), 0);
        assert_eq!(escrow.claim(&mut alloc, NOW + 10_000), 0);
        assert_eq!(alloc.claimed_amount, ALLOCATION);
        assert_eq!(escrow.vault, TOTAL - ALLOCATION);
        assert!(escrow.conserved(&[&alloc]));
    }

    #[test]
    fn future_cliff_releases_nothing() {
        let mut escrow = Escrow::new(NOW - 10, NOW + 100, NOW + 200, TOTAL);
        let mut alloc = escrow.allocate(ALLOCATION);

        assert_eq!(escrow.claim(&mut alloc, NOW), 0);
        assert_eq!(escrow.claim(&mut alloc, NOW + 99), 0);
        assert_eq!(alloc.claimed_amount, 0);
        assert_eq!(escrow.config.claimed_total, 0);
        assert_eq!(escrow.vault, TOTAL);
        assert_eq!(alloc.status(), AllocationStatus::Active);
    }

    #[test]
    fn half_elapsed_releases_about_half() {
        let mut escrow = Escrow::new(NOW - 100, NOW - 100, NOW + 100, TOTAL);
        let mut alloc = escrow.allocate(ALLOCATION);

        escrow.claim(&mut alloc, NOW);
        let expected = 25_000 * UNIT;
        let tolerance = expected / 10;
        assert!(alloc.claimed_amount + tolerance >= expected);
        assert!(alloc.claimed_amount <= expected + tolerance);

        // Same instant again: zero second delta.
        assert_eq!(escrow.claim(&mut alloc, NOW), 0);
    }

    #[test]
    fn zero_allocation_claims_cleanly() {
        let mut escrow = Escrow::new(NOW - 100, NOW - 50, NOW - 10, TOTAL);
        let mut alloc = escrow.allocate(0);

        assert_eq!(alloc.status(), AllocationStatus::FullyClaimed);
        assert_eq!(escrow.claim(&mut alloc, NOW), 0);
        assert_eq!(alloc.claimed_amount, 0);
        assert_eq!(escrow.vault, TOTAL);
    }

    #[test]
    fn beneficiaries_claim_independently() {
        let mut escrow = Escrow::new(NOW - 100, NOW - 100, NOW + 100, TOTAL);
        let mut a = escrow.allocate(30_000 * UNIT);
        let mut b = escrow.allocate(20_000 * UNIT);

        escrow.claim(&mut a, NOW);
        assert_eq!(a.claimed_amount, 15_000 * UNIT);
        assert_eq!(b.claimed_amount, 0);

        escrow.claim(&mut b, NOW + 50);
        assert_eq!(b.claimed_amount, 15_000 * UNIT);
        assert_eq!(a.claimed_amount, 15_000 * UNIT);

        escrow.claim(&mut a, NOW + 100);
        escrow.claim(&mut b, NOW + 100);
        assert_eq!(a.claimed_amount, 30_000 * UNIT);
        assert_eq!(b.claimed_amount, 20_000 * UNIT);
        assert_eq!(escrow.vault, TOTAL - 50_000 * UNIT);
        assert!(escrow.conserved(&[&a, &b]));
    }

    #[test]
    fn claims_are_monotonic_bounded_and_conserving() {
        let mut escrow = Escrow::new(NOW, NOW + 37, NOW + 1_000, TOTAL);
        let mut a = escrow.allocate(7_777_777);
        let mut b = escrow.allocate(ALLOCATION);

        let mut last = (0, 0);
        let mut t = NOW - 20;
        while t <= NOW + 1_050 {
            escrow.claim(&mut a, t);
            if t % 3 == 0 {
                escrow.claim(&mut b, t);
            }
            assert!(a.claimed_amount >= last.0);
            assert!(b.claimed_amount >= last.1);
            assert!(a.claimed_amount <= a.total_allocation);
            assert!(b.claimed_amount <= b.total_allocation);
            if t < NOW + 37 {
                assert_eq!(a.claimed_amount, 0);
            }
            assert!(escrow.conserved(&[&a, &b]));
            last = (a.claimed_amount, b.claimed_amount);
            t += 13;
        }

        escrow.claim(&mut b, NOW + 2_000);
        assert_eq!(a.status(), AllocationStatus::FullyClaimed);
        assert_eq!(b.status(), AllocationStatus::FullyClaimed);
        assert_eq!(escrow.vault, TOTAL - 7_777_777 - ALLOCATION);
    }

    #[test]
    fn short_vault_fails_without_side_effects() {
        let mut escrow = Escrow::new(NOW - 100, NOW - 50, NOW - 10, TOTAL);
        let mut alloc = escrow.allocate(ALLOCATION);

        let err = alloc
            .settle_claim(&mut escrow.config, ALLOCATION - 1, NOW)
            .unwrap_err();
        assert!(matches!(err, VestingError::InsufficientVaultBalance));
        assert_eq!(alloc.claimed_amount, 0);
        assert_eq!(escrow.config.claimed_total, 0);
    }

    #[test]
    fn over_subscribed_schedule_runs_dry_first_come_first_served() {
        let mut escrow = Escrow::new(NOW - 100, NOW - 50, NOW - 10, 60 * UNIT);
        let mut a = escrow.allocate(50 * UNIT);
        let mut b = escrow.allocate(50 * UNIT);

        assert_eq!(escrow.claim(&mut a, NOW), 50 * UNIT);
        let err = b
            .settle_claim(&mut escrow.config, escrow.vault, NOW)
            .unwrap_err();
        assert!(matches!(err, VestingError::InsufficientVaultBalance));
        assert_eq!(b.claimed_amount, 0);
        assert!(escrow.conserved(&[&a, &b]));
    }

    #[test]
    fn quote_matches_settlement() {
        let mut escrow = Escrow::new(NOW - 100, NOW - 100, NOW + 100, TOTAL);
        let mut alloc = escrow.allocate(ALLOCATION);

        let q = alloc.quote(&escrow.config, NOW).unwrap();
        assert_eq!(q.claimed, 0);
        assert_eq!(escrow.claim(&mut alloc, NOW), q.claimable);

        let q = alloc.quote(&escrow.config, NOW).unwrap();
        assert_eq!(q.claimable, 0);
        assert_eq!(q.unlocked, q.claimed);
    }

    #[test]
    fn allocation_address_is_unique_per_pair() {
        let schedule = Pubkey::new_unique();
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();

        let (a, _) = UserVesting::address(&schedule, &alice);
        assert_eq!(a, UserVesting::address(&schedule, &alice).0);
        assert_ne!(a, UserVesting::address(&schedule, &bob).0);
        assert_ne!(a, UserVesting::address(&Pubkey::new_unique(), &alice).0);
        assert!(!UserVesting::default().is_initialized());
    }

    #[test]
    fn second_open_keeps_claim_progress() {
        let schedule = Pubkey::new_unique();
        let beneficiary = Pubkey::new_unique();
        let mut alloc = UserVesting::default();
        alloc.open(schedule, beneficiary, ALLOCATION, 250).unwrap();
        assert!(alloc.is_initialized());
        assert_eq!(alloc.claimed_amount, 0);
        alloc.claimed_amount = 123;

        let err = alloc.open(schedule, beneficiary, 0, 250).unwrap_err();
        assert!(matches!(err, VestingError::AlreadyInitialized));
        assert_eq!(alloc.total_allocation, ALLOCATION);
        assert_eq!(alloc.claimed_amount, 123);
    }

    #[test]
    fn zero_allocation_can_be_opened() {
        let mut alloc = UserVesting::default();
        alloc
            .open(Pubkey::new_unique(), Pubkey::new_unique(), 0, 1)
            .unwrap();
        assert!(alloc.is_initialized());
        assert_eq!(alloc.total_allocation, 0);
    }

    #[test]
    fn only_beneficiary_may_claim() {
        let escrow = Escrow::new(NOW - 100, NOW - 50, NOW - 10, TOTAL);
        let alloc = escrow.allocate(ALLOCATION);
        assert!(alloc.check_claimer(&alloc.beneficiary).is_ok());
        assert!(matches!(
            alloc.check_claimer(&Pubkey::new_unique()),
            Err(VestingError::Unauthorized)
        ));
        assert!(matches!(
            alloc.check_claimer(&escrow.config.authority),
            Err(VestingError::Unauthorized)
        ));
    }
}
