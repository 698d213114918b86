//! Linear vesting curve with a cliff.
//!
//! - now < cliff            => 0
//! - now >= end             => total
//! - otherwise              => floor(total * (now - start) / (end - start))
//!
//! Products are taken in u128 and the quotient truncates toward zero, so a
//! partial second never releases more than its exact share.

use crate::error::VestingError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VestingWindow {
    pub start_time: i64,
    pub cliff_time: i64,
    pub end_time: i64,
}

/// Snapshot of an allocation at a given instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClaimQuote {
    pub unlocked: u64,
    pub claimed: u64,
    pub claimable: u64,
}

impl VestingWindow {
    /// Validates `start <= cliff <= end`.
    pub fn new(start_time: i64, cliff_time: i64, end_time: i64) -> Result<Self, VestingError> {
        if start_time > cliff_time || cliff_time > end_time {
            return Err(VestingError::InvalidSchedule);
        }
        Ok(Self {
            start_time,
            cliff_time,
            end_time,
        })
    }

    /// Cumulative amount of `total` unlocked at `now`.
    pub fn unlocked(&self, total: u64, now: i64) -> Result<u64, VestingError> {
        if now < self.cliff_time {
            return Ok(0);
        }
        if now >= self.end_time {
            return Ok(total);
        }

        // cliff <= now < end, so start <= now < end and the duration is non-zero.
        let elapsed = span(self.start_time, now)?;
        let duration = span(self.start_time, self.end_time)?;
        if duration == 0 {
            return Err(VestingError::InvalidSchedule);
        }

        let v = (total as u128)
            .checked_mul(elapsed)
            .ok_or(VestingError::MathOverflow)?
            / duration;
        u64::try_from(v).map_err(|_| VestingError::MathOverflow)
    }

    pub fn quote(
        &self,
        total_allocation: u64,
        claimed_amount: u64,
        now: i64,
    ) -> Result<ClaimQuote, VestingError> {
        let unlocked = self.unlocked(total_allocation, now)?;
        Ok(ClaimQuote {
            unlocked,
            claimed: claimed_amount,
            claimable: unlocked.saturating_sub(claimed_amount),
        })
    }
}

fn span(from: i64, to: i64) -> Result<u128, VestingError> {
    let d = (to as i128) - (from as i128);
    u128::try_from(d).map_err(|_| VestingError::InvalidSchedule)
}
