//! # Types
//!
//! Shared data structures used across all modules of the vault.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! Campaigns and plans are each stored as two separate ledger entries:
//!
//! - [`CampaignConfig`] / [`PlanConfig`] — written once at creation; never
//!   mutated. Deposit bounds and the reward rate are frozen here, so a later
//!   administrator change can never retroactively reprice an open record.
//! - [`CampaignState`] / [`PlanState`] — written on every deposit, status
//!   change and allocation.
//!
//! The public API exposes the reconstructed [`Campaign`] and [`Plan`] structs
//! for convenience.
//!
//! ### Status as a loose state machine
//!
//! [`CampaignStatus`] deliberately does **not** enforce a forward-only
//! lifecycle. The administrator may move a campaign between any two distinct
//! statuses; the only rejected transition is the no-op (new == current).
//! Withdrawal of queue-admitted records is gated on the campaign having left
//! the funding phase, not on any particular transition path.

use soroban_sdk::{contracttype, Vec};

/// Lifecycle status of a campaign.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CampaignStatus {
    /// Created but not accepting deposits yet.
    Frozen,
    /// Accepting deposits (direct and queued).
    Funding,
    /// Capacity reached; queue-admitted records may withdraw at maturity.
    Fulfilled,
    /// Funding goal missed; queue-admitted records may withdraw at maturity.
    NotFulfilled,
    /// Campaign wound down.
    Finished,
}

/// Admission state of a deposit record.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DepositState {
    /// Queued for allocation; not yet counted against capacity.
    Queued,
    /// Committed; the maturity clock is running.
    Confirmed,
    /// Closed. Terminal: the slot may only be re-opened by a fresh deposit.
    Withdrawn,
}

/// Immutable campaign configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignConfig {
    pub id: u64,
    /// Lock duration in whole days.
    pub duration_days: u64,
    /// Reward rate as a fraction scaled by [`crate::rewards::RATE_SCALE`].
    pub rate: i128,
    /// Per-record lower bound at admission time.
    pub min_amount: i128,
    /// Per-record upper bound, and the aggregate commitment capacity.
    pub max_amount: i128,
}

/// Mutable campaign state, updated on deposits, allocation and status changes.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignState {
    pub status: CampaignStatus,
    /// Sum of confirmed deposits admitted so far. Never exceeds
    /// `max_amount`; not decremented on withdrawal (capacity is
    /// admission-scoped).
    pub total_committed: i128,
    /// Sum of queued deposits awaiting allocation.
    pub total_queued: i128,
}

/// Full representation of a campaign, reconstructed from the split
/// config + state storage entries. Public API return type.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    pub id: u64,
    pub duration_days: u64,
    pub rate: i128,
    pub min_amount: i128,
    pub max_amount: i128,
    pub status: CampaignStatus,
    pub total_committed: i128,
    pub total_queued: i128,
}

/// Immutable staking-plan configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlanConfig {
    pub id: u64,
    pub duration_days: u64,
    pub rate: i128,
    pub min_amount: i128,
    pub max_amount: i128,
}

/// Mutable staking-plan state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlanState {
    pub active: bool,
    pub total_staked: i128,
}

/// Full representation of a staking plan. Public API return type.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Plan {
    pub id: u64,
    pub duration_days: u64,
    pub rate: i128,
    pub min_amount: i128,
    pub max_amount: i128,
    pub active: bool,
    pub total_staked: i128,
}

/// A holder's open (or closed) deposit against a campaign or plan.
///
/// One slot per (holder, target). Repeat deposits through the same admission
/// path accumulate into the open slot and keep the original `start_time`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositRecord {
    pub amount: i128,
    /// Ledger timestamp the maturity clock runs from. For queue-admitted
    /// records this is stamped at allocation, not at queueing.
    pub start_time: u64,
    pub state: DepositState,
    /// True when the record was admitted through the queue; such records
    /// carry the extra withdrawal status gate.
    pub via_queue: bool,
}

/// A holder's tiered-staking position. Append-only: indices are stable and
/// never reused, a closed position stays in the list with `withdrawn = true`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub amount: i128,
    /// Chosen duration in whole months; `0` is the flexible duration.
    pub months: u32,
    /// Rate frozen from the tier table at stake time.
    pub rate: i128,
    pub start_time: u64,
    pub withdrawn: bool,
}

/// Tier-table configuration: six amount tiers crossed with six duration
/// values. Replaceable wholesale by the administrator; open positions keep
/// the rate they froze at stake time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierConfig {
    /// Inclusive lower bound of each amount tier.
    pub tier_mins: Vec<i128>,
    /// Exclusive upper bound of each amount tier; contiguous with the next
    /// tier's lower bound.
    pub tier_maxs: Vec<i128>,
    /// Approved duration values in whole months.
    pub months: Vec<u32>,
    /// `rates.get(row).get(col)` is the rate for amount tier `row` staked for
    /// `months.get(col)` months.
    pub rates: Vec<Vec<i128>>,
}

/// Global envelope for tiered-staking amounts, checked before tier lookup.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeRange {
    pub min: i128,
    pub max: i128,
}

impl Campaign {
    pub fn from_parts(config: CampaignConfig, state: CampaignState) -> Self {
        Campaign {
            id: config.id,
            duration_days: config.duration_days,
            rate: config.rate,
            min_amount: config.min_amount,
            max_amount: config.max_amount,
            status: state.status,
            total_committed: state.total_committed,
            total_queued: state.total_queued,
        }
    }
}

impl Plan {
    pub fn from_parts(config: PlanConfig, state: PlanState) -> Self {
        Plan {
            id: config.id,
            duration_days: config.duration_days,
            rate: config.rate,
            min_amount: config.min_amount,
            max_amount: config.max_amount,
            active: state.active,
            total_staked: state.total_staked,
        }
    }
}
