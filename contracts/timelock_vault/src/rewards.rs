//! # Rewards
//!
//! Fixed-point reward math and elapsed-time helpers shared by campaigns,
//! plans and tiered staking. All arithmetic is `i128` integer math; the
//! single scale constant keeps rates comparable across every variant.

use crate::types::DepositRecord;

/// Denominator for all rate values. A rate of 4.5% is stored as
/// `45_000_000_000_000_000`.
pub const RATE_SCALE: i128 = 1_000_000_000_000_000_000;

pub const SECONDS_PER_DAY: u64 = 86_400;

/// Tiered-staking months are 30-day months.
pub const SECONDS_PER_MONTH: u64 = 30 * SECONDS_PER_DAY;

/// Linear reward on a matured principal: `principal * rate / RATE_SCALE`.
pub fn reward(principal: i128, rate: i128) -> i128 {
    principal * rate / RATE_SCALE
}

/// Whole days elapsed since `start_time`. Integer division: a record reports
/// zero elapsed days until a full day has passed.
pub fn elapsed_days(now: u64, start_time: u64) -> u64 {
    now.saturating_sub(start_time) / SECONDS_PER_DAY
}

/// Days left on a record, never negative. Returns the full configured
/// duration until at least one whole day has elapsed.
pub fn remaining_days(now: u64, record: &DepositRecord, duration_days: u64) -> u64 {
    duration_days.saturating_sub(elapsed_days(now, record.start_time))
}

/// Maturity gate for day-denominated records.
pub fn is_mature_days(now: u64, start_time: u64, duration_days: u64) -> bool {
    elapsed_days(now, start_time) >= duration_days
}

/// Maturity gate for month-denominated positions. A zero-month position is
/// the flexible duration and is always mature.
pub fn is_mature_months(now: u64, start_time: u64, months: u32) -> bool {
    now.saturating_sub(start_time) >= u64::from(months) * SECONDS_PER_MONTH
}
