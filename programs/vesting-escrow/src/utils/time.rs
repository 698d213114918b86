use anchor_lang::prelude::*;

/// Current cluster unix timestamp (seconds).
///
/// Read once per instruction and handed to the pure curve code, so vesting
/// math never samples the clock itself.
pub fn now_ts() -> Result<i64> {
    Ok(Clock::get()?.unix_timestamp)
}
