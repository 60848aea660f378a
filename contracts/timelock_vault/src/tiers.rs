//! # Tiers
//!
//! The 6x6 tier table for variable-duration staking: six contiguous amount
//! tiers crossed with six administrator-chosen month values. The table is
//! installed with defaults at `init` and replaceable wholesale; lookups
//! always read the current table, while open positions keep the rate frozen
//! at stake time.

use soroban_sdk::{panic_with_error, Env, Vec};

use crate::storage;
use crate::types::{StakeRange, TierConfig};
use crate::Error;

/// Number of amount tiers and of duration values.
pub const TIER_COUNT: u32 = 6;

/// One whole token at the Stellar Asset Contract's 7 decimal places.
const TOKEN: i128 = 10_000_000;

/// Default inclusive lower bounds of the six amount tiers, in whole tokens.
const DEFAULT_TIER_MINS: [i128; 6] = [30_000, 35_000, 60_000, 150_000, 300_000, 600_000];

/// Default exclusive upper bounds; the last tier is unbounded in practice.
const DEFAULT_TIER_MAXS: [i128; 6] = [35_000, 60_000, 150_000, 300_000, 600_000, i128::MAX / TOKEN];

/// Default approved durations in whole months.
const DEFAULT_MONTHS: [u32; 6] = [1, 3, 6, 12, 18, 24];

/// Default rate matrix, rows = amount tiers, columns = durations, scaled by
/// [`crate::rewards::RATE_SCALE`]. The lowest tier staked for the 3-month
/// duration (column 1) pays 1.5%.
const DEFAULT_RATES: [[i128; 6]; 6] = [
    [
        10_000_000_000_000_000,
        15_000_000_000_000_000,
        20_000_000_000_000_000,
        25_000_000_000_000_000,
        30_000_000_000_000_000,
        35_000_000_000_000_000,
    ],
    [
        15_000_000_000_000_000,
        20_000_000_000_000_000,
        25_000_000_000_000_000,
        30_000_000_000_000_000,
        35_000_000_000_000_000,
        40_000_000_000_000_000,
    ],
    [
        20_000_000_000_000_000,
        25_000_000_000_000_000,
        30_000_000_000_000_000,
        35_000_000_000_000_000,
        40_000_000_000_000_000,
        45_000_000_000_000_000,
    ],
    [
        25_000_000_000_000_000,
        30_000_000_000_000_000,
        35_000_000_000_000_000,
        40_000_000_000_000_000,
        45_000_000_000_000_000,
        50_000_000_000_000_000,
    ],
    [
        30_000_000_000_000_000,
        35_000_000_000_000_000,
        40_000_000_000_000_000,
        45_000_000_000_000_000,
        50_000_000_000_000_000,
        55_000_000_000_000_000,
    ],
    [
        35_000_000_000_000_000,
        40_000_000_000_000_000,
        45_000_000_000_000_000,
        50_000_000_000_000_000,
        55_000_000_000_000_000,
        60_000_000_000_000_000,
    ],
];

/// Build the default tier configuration installed at `init`.
pub fn default_config(env: &Env) -> TierConfig {
    let mut tier_mins = Vec::new(env);
    let mut tier_maxs = Vec::new(env);
    let mut months = Vec::new(env);
    let mut rates = Vec::new(env);
    for i in 0..TIER_COUNT as usize {
        tier_mins.push_back(DEFAULT_TIER_MINS[i] * TOKEN);
        tier_maxs.push_back(DEFAULT_TIER_MAXS[i] * TOKEN);
        months.push_back(DEFAULT_MONTHS[i]);
        let mut row = Vec::new(env);
        for j in 0..TIER_COUNT as usize {
            row.push_back(DEFAULT_RATES[i][j]);
        }
        rates.push_back(row);
    }
    TierConfig {
        tier_mins,
        tier_maxs,
        months,
        rates,
    }
}

/// Default global amount envelope: the lowest tier min up to the top of the
/// last tier.
pub fn default_range(env: &Env) -> StakeRange {
    let config = default_config(env);
    StakeRange {
        min: config.tier_mins.get_unchecked(0),
        max: config.tier_maxs.get_unchecked(TIER_COUNT - 1),
    }
}

/// Look up the rate for `amount` staked for `months` whole months.
///
/// `months` is a duration *value* that must be a member of the configured
/// set, not an index into it.
pub fn get_rate(env: &Env, amount: i128, months: u32) -> i128 {
    let config = storage::load_tier_config(env);
    let row = match find_tier(&config, amount) {
        Some(row) => row,
        None => panic_with_error!(env, Error::InvalidStakeAmount),
    };
    let col = match config.months.first_index_of(months) {
        Some(col) => col,
        None => panic_with_error!(env, Error::InvalidStakeMonth),
    };
    config.rates.get_unchecked(row).get_unchecked(col)
}

/// Row whose `[min, max)` bounds contain `amount`.
fn find_tier(config: &TierConfig, amount: i128) -> Option<u32> {
    for i in 0..config.tier_mins.len() {
        if amount >= config.tier_mins.get_unchecked(i) && amount < config.tier_maxs.get_unchecked(i)
        {
            return Some(i);
        }
    }
    None
}

/// Replace the rate matrix. Shape must be 6x6 with non-negative rates.
pub fn set_rates(env: &Env, rates: &Vec<Vec<i128>>) {
    if rates.len() != TIER_COUNT {
        panic_with_error!(env, Error::InvalidTierConfig);
    }
    for row in rates.iter() {
        if row.len() != TIER_COUNT {
            panic_with_error!(env, Error::InvalidTierConfig);
        }
        for rate in row.iter() {
            if rate < 0 {
                panic_with_error!(env, Error::InvalidTierConfig);
            }
        }
    }
    let mut config = storage::load_tier_config(env);
    config.rates = rates.clone();
    storage::save_tier_config(env, &config);
}

/// Replace the amount-tier bounds. Six `[min, max)` pairs, each non-empty,
/// contiguous with no gaps so that every valid amount lands in exactly one
/// tier.
pub fn set_bounds(env: &Env, mins: &Vec<i128>, maxs: &Vec<i128>) {
    if mins.len() != TIER_COUNT || maxs.len() != TIER_COUNT {
        panic_with_error!(env, Error::InvalidTierConfig);
    }
    for i in 0..TIER_COUNT {
        if mins.get_unchecked(i) >= maxs.get_unchecked(i) {
            panic_with_error!(env, Error::InvalidTierConfig);
        }
        if i > 0 && maxs.get_unchecked(i - 1) != mins.get_unchecked(i) {
            panic_with_error!(env, Error::InvalidTierConfig);
        }
    }
    let mut config = storage::load_tier_config(env);
    config.tier_mins = mins.clone();
    config.tier_maxs = maxs.clone();
    storage::save_tier_config(env, &config);
}

/// Replace the approved duration set. Six month values; duplicates are
/// rejected so that a value resolves to exactly one column.
pub fn set_months(env: &Env, months: &Vec<u32>) {
    if months.len() != TIER_COUNT {
        panic_with_error!(env, Error::InvalidTierConfig);
    }
    for i in 0..TIER_COUNT {
        let value = months.get_unchecked(i);
        if months.first_index_of(value) != Some(i) {
            panic_with_error!(env, Error::InvalidTierConfig);
        }
    }
    let mut config = storage::load_tier_config(env);
    config.months = months.clone();
    storage::save_tier_config(env, &config);
}

/// Replace the global amount envelope for new positions.
pub fn set_range(env: &Env, min: i128, max: i128) {
    if min < 0 || min > max {
        panic_with_error!(env, Error::InvalidTierConfig);
    }
    storage::save_stake_range(env, &StakeRange { min, max });
}

/// Convenience used by `init`.
pub fn install_defaults(env: &Env) {
    storage::save_tier_config(env, &default_config(env));
    storage::save_stake_range(env, &default_range(env));
}
