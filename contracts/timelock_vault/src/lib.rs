//! # Timelock Vault Contract
//!
//! Root crate of the **time-locked value ledger**. It exposes the single
//! Soroban contract `TimelockVault` whose entry points cover three families
//! of time-locked deposits against one fungible asset:
//!
//! | Family            | Entry Point(s)                                        |
//! |-------------------|-------------------------------------------------------|
//! | Bootstrap         | [`TimelockVault::init`]                               |
//! | Campaigns (admin) | `create_campaign`, `change_status`, `allocate`, `set_membership_minimum` |
//! | Campaigns (holder)| `contribute`, `queue_up`, `uncontribute`              |
//! | Plans (admin)     | `create_plan`, `set_plan_active`                      |
//! | Plans (holder)    | `stake`, `unstake`                                    |
//! | Tiered (admin)    | `update_rate_table`, `update_tier_bounds`, `update_duration_set`, `update_stake_range` |
//! | Tiered (holder)   | `open_position`, `close_position`, `calculate_interest` |
//! | Queries           | `get_campaign`, `get_plan`, `get_apr`, `get_remaining_duration`, ... |
//!
//! ## Architecture
//!
//! Authorization is fully delegated to [`access`]. Storage access is fully
//! delegated to [`storage`]. Reward math lives in [`rewards`], the tier
//! table in [`tiers`]. This file contains the public entry points, the
//! admission/withdrawal control flow and event emissions.
//!
//! ## Ordering discipline
//!
//! The deposited asset is the one external collaborator. Every withdrawal
//! seals its record (`Withdrawn`) and writes all ledger state **before** the
//! outbound `transfer` is issued, so a reentrant caller observes the updated
//! record and is rejected by the normal guards.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, token, Address, Env, Vec,
};

mod access;
mod events;
mod rewards;
mod storage;
mod tiers;
mod types;

#[cfg(test)]
mod test_allocation;
#[cfg(test)]
mod test_plans;

pub use rewards::RATE_SCALE;
pub use types::{
    Campaign, CampaignStatus, DepositRecord, DepositState, Plan, Position, StakeRange, TierConfig,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotAuthorized = 1,
    AlreadyInitialized = 2,
    CampaignNotFound = 3,
    PlanNotFound = 4,
    CampaignExists = 5,
    PlanExists = 6,
    /// No-op status transition (new status equals the current one).
    StatusUnchanged = 7,
    /// The target's lifecycle phase does not permit the requested action.
    StatusNotAllowed = 8,
    AmountBelowMinimum = 9,
    AmountAboveMaximum = 10,
    CapacityExceeded = 11,
    DurationNotPassed = 12,
    AlreadyWithdrawn = 13,
    RecordNotFound = 14,
    /// An open record admitted through the other path already exists.
    RecordConflict = 15,
    MembershipBelowMinimum = 16,
    /// No amount tier contains the requested amount.
    InvalidStakeAmount = 17,
    /// The month value is not in the configured duration set (rate lookup).
    InvalidStakeMonth = 18,
    /// The amount is outside the global tiered-staking envelope.
    AmountOutOfRange = 19,
    /// The month value is not in the configured duration set (staking).
    InvalidStakeDuration = 20,
    StakeIndexOutOfBounds = 21,
    InvalidTierConfig = 22,
    InvalidTargetConfig = 23,
}

#[contract]
pub struct TimelockVault;

#[contractimpl]
impl TimelockVault {
    // ─────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract: fix the administrator, the deposited asset
    /// and the membership asset, and install the default tier table.
    ///
    /// Must be called exactly once after deployment. Subsequent calls panic
    /// with `Error::AlreadyInitialized`. The membership gate starts disabled
    /// (minimum 0).
    pub fn init(env: Env, admin: Address, asset: Address, membership_asset: Address) {
        admin.require_auth();
        access::init_admin(&env, &admin, &asset, &membership_asset);
        tiers::install_defaults(&env);
    }

    // ─────────────────────────────────────────────────────────
    // Campaigns — administrator surface
    // ─────────────────────────────────────────────────────────

    /// Create a campaign. `status` is the initial lifecycle status; any
    /// value is permitted as a starting point. Bounds and rate are frozen
    /// for the campaign's lifetime.
    pub fn create_campaign(
        env: Env,
        caller: Address,
        id: u64,
        duration_days: u64,
        rate: i128,
        min_amount: i128,
        max_amount: i128,
        status: CampaignStatus,
    ) -> Campaign {
        access::require_admin(&env, &caller);
        if storage::has_campaign(&env, id) {
            panic_with_error!(&env, Error::CampaignExists);
        }
        if rate < 0 || min_amount < 0 || min_amount > max_amount {
            panic_with_error!(&env, Error::InvalidTargetConfig);
        }

        let config = types::CampaignConfig {
            id,
            duration_days,
            rate,
            min_amount,
            max_amount,
        };
        let state = types::CampaignState {
            status,
            total_committed: 0,
            total_queued: 0,
        };
        storage::save_campaign(&env, &config, &state);

        events::campaign_created(
            &env,
            events::CampaignCreated {
                id,
                duration_days,
                rate,
                min_amount,
                max_amount,
                status,
            },
        );
        Campaign::from_parts(config, state)
    }

    /// Move a campaign to `new_status`. The lifecycle is deliberately loose:
    /// the only rejected transition is the no-op, including out of states
    /// that read as terminal.
    pub fn change_status(env: Env, caller: Address, id: u64, new_status: CampaignStatus) {
        access::require_admin(&env, &caller);
        let mut state = storage::load_campaign_state(&env, id);
        if state.status == new_status {
            panic_with_error!(&env, Error::StatusUnchanged);
        }
        let old_status = state.status;
        state.status = new_status;
        storage::save_campaign_state(&env, id, &state);

        events::campaign_status_changed(
            &env,
            events::CampaignStatusChanged {
                id,
                old_status,
                new_status,
            },
        );
    }

    /// Set the minimum membership-asset holding required to deposit into a
    /// campaign. Takes effect for subsequent deposits only; `0` disables the
    /// gate.
    pub fn set_membership_minimum(env: Env, caller: Address, minimum: i128) {
        access::require_admin(&env, &caller);
        storage::set_membership_minimum(&env, minimum);
        events::membership_minimum_updated(&env, events::MembershipMinimumUpdated { minimum });
    }

    pub fn get_membership_minimum(env: Env) -> i128 {
        storage::get_membership_minimum(&env)
    }

    /// Convert queued deposits into confirmed allocations, first-queued
    /// first, up to the campaign's capacity.
    ///
    /// A queued record is confirmed only if it fits entirely within the
    /// remaining capacity; a record that does not fit is refunded in full
    /// and closed. There are no partial fills: every queued holder leaves
    /// this call either fully allocated or fully repaid. Confirmation stamps
    /// the maturity clock with the allocation time. Calling with an empty
    /// queue is a no-op.
    pub fn allocate(env: Env, caller: Address, id: u64) {
        access::require_admin(&env, &caller);
        let config = storage::load_campaign_config(&env, id);
        let mut state = storage::load_campaign_state(&env, id);
        let queue = storage::load_queue(&env, id);

        let now = env.ledger().timestamp();
        let mut remaining = config.max_amount - state.total_committed;
        let mut confirmed_total: i128 = 0;
        let mut refunded_total: i128 = 0;
        let mut refunds: Vec<(Address, i128)> = Vec::new(&env);

        for holder in queue.iter() {
            let mut record = match storage::load_deposit(&env, &holder, id, false) {
                Some(record) if record.state == DepositState::Queued => record,
                // Stale queue entry; nothing to allocate for this holder.
                _ => continue,
            };
            if record.amount <= remaining {
                record.state = DepositState::Confirmed;
                record.start_time = now;
                remaining -= record.amount;
                confirmed_total += record.amount;
                storage::save_deposit(&env, &holder, id, false, &record);
            } else {
                let refund = record.amount;
                record.state = DepositState::Withdrawn;
                storage::save_deposit(&env, &holder, id, false, &record);
                refunded_total += refund;
                refunds.push_back((holder.clone(), refund));
            }
        }

        state.total_committed += confirmed_total;
        state.total_queued -= confirmed_total + refunded_total;
        storage::save_campaign_state(&env, id, &state);
        storage::save_queue(&env, id, &Vec::new(&env));

        // All ledger state is settled; only now push the refunds out.
        let asset = token::Client::new(&env, &storage::get_asset(&env));
        let contract = env.current_contract_address();
        for (holder, refund) in refunds.iter() {
            asset.transfer(&contract, &holder, &refund);
        }

        events::allocation_completed(
            &env,
            events::AllocationCompleted {
                id,
                confirmed_total,
                refunded_total,
            },
        );
    }

    // ─────────────────────────────────────────────────────────
    // Campaigns — holder surface
    // ─────────────────────────────────────────────────────────

    /// Deposit into a campaign with immediate confirmation. The maturity
    /// clock starts now. Counts against the campaign's capacity at once.
    pub fn contribute(env: Env, holder: Address, id: u64, amount: i128) {
        Self::admit_campaign_deposit(&env, &holder, id, amount, false);
    }

    /// Deposit into a campaign's allocation queue. Funds are pulled now but
    /// stay queued until the administrator runs `allocate`.
    pub fn queue_up(env: Env, holder: Address, id: u64, amount: i128) {
        Self::admit_campaign_deposit(&env, &holder, id, amount, true);
    }

    /// Withdraw a matured campaign deposit: principal plus
    /// `principal * rate / RATE_SCALE` in a single transfer.
    ///
    /// Queue-admitted records additionally require the campaign to have left
    /// the funding phase.
    pub fn uncontribute(env: Env, holder: Address, id: u64) {
        holder.require_auth();
        let config = storage::load_campaign_config(&env, id);
        let state = storage::load_campaign_state(&env, id);
        let mut record = match storage::load_deposit(&env, &holder, id, false) {
            Some(record) => record,
            None => panic_with_error!(&env, Error::RecordNotFound),
        };

        match record.state {
            DepositState::Withdrawn => panic_with_error!(&env, Error::AlreadyWithdrawn),
            // A queued record has no committed capital to withdraw yet.
            DepositState::Queued => panic_with_error!(&env, Error::StatusNotAllowed),
            DepositState::Confirmed => {}
        }
        if record.via_queue {
            match state.status {
                CampaignStatus::Fulfilled
                | CampaignStatus::NotFulfilled
                | CampaignStatus::Finished => {}
                CampaignStatus::Frozen | CampaignStatus::Funding => {
                    panic_with_error!(&env, Error::StatusNotAllowed)
                }
            }
        }

        let now = env.ledger().timestamp();
        if !rewards::is_mature_days(now, record.start_time, config.duration_days) {
            panic_with_error!(&env, Error::DurationNotPassed);
        }

        let principal = record.amount;
        let reward = rewards::reward(principal, config.rate);

        // Seal the record before the outbound transfer.
        record.state = DepositState::Withdrawn;
        storage::save_deposit(&env, &holder, id, false, &record);

        let asset = token::Client::new(&env, &storage::get_asset(&env));
        asset.transfer(&env.current_contract_address(), &holder, &(principal + reward));

        events::withdrawal_completed(
            &env,
            events::WithdrawalCompleted {
                id,
                holder,
                principal,
                reward,
            },
        );
    }

    // ─────────────────────────────────────────────────────────
    // Campaigns — queries
    // ─────────────────────────────────────────────────────────

    /// Retrieve a campaign by its id.
    pub fn get_campaign(env: Env, id: u64) -> Campaign {
        Campaign::from_parts(
            storage::load_campaign_config(&env, id),
            storage::load_campaign_state(&env, id),
        )
    }

    /// The holder's deposit record against a campaign.
    pub fn get_deposit(env: Env, holder: Address, id: u64) -> DepositRecord {
        match storage::load_deposit(&env, &holder, id, false) {
            Some(record) => record,
            None => panic_with_error!(&env, Error::RecordNotFound),
        }
    }

    /// Whole days left until the holder's campaign deposit matures. Returns
    /// the full configured duration until one whole day has elapsed; never
    /// negative.
    pub fn get_remaining_duration(env: Env, holder: Address, id: u64) -> u64 {
        let config = storage::load_campaign_config(&env, id);
        let record = match storage::load_deposit(&env, &holder, id, false) {
            Some(record) => record,
            None => panic_with_error!(&env, Error::RecordNotFound),
        };
        rewards::remaining_days(env.ledger().timestamp(), &record, config.duration_days)
    }

    /// Reward the holder's campaign deposit would pay if withdrawn now:
    /// zero before maturity (nothing accrues partially), the full linear
    /// reward after.
    pub fn get_current_reward(env: Env, holder: Address, id: u64) -> i128 {
        let config = storage::load_campaign_config(&env, id);
        let record = match storage::load_deposit(&env, &holder, id, false) {
            Some(record) => record,
            None => panic_with_error!(&env, Error::RecordNotFound),
        };
        if record.state != DepositState::Confirmed {
            return 0;
        }
        let now = env.ledger().timestamp();
        if !rewards::is_mature_days(now, record.start_time, config.duration_days) {
            return 0;
        }
        rewards::reward(record.amount, config.rate)
    }

    /// Campaign ids for which the holder has an open (non-withdrawn) record,
    /// in first-deposit order.
    pub fn get_contributed_campaigns(env: Env, holder: Address) -> Vec<u64> {
        let mut open = Vec::new(&env);
        for id in storage::load_holder_targets(&env, &holder, false).iter() {
            if let Some(record) = storage::load_deposit(&env, &holder, id, false) {
                if record.state != DepositState::Withdrawn {
                    open.push_back(id);
                }
            }
        }
        open
    }

    // ─────────────────────────────────────────────────────────
    // Plans — administrator surface
    // ─────────────────────────────────────────────────────────

    /// Create a staking plan. Bounds and rate are frozen for the plan's
    /// lifetime; only the `active` flag is mutable.
    pub fn create_plan(
        env: Env,
        caller: Address,
        id: u64,
        duration_days: u64,
        rate: i128,
        min_amount: i128,
        max_amount: i128,
        active: bool,
    ) -> Plan {
        access::require_admin(&env, &caller);
        if storage::has_plan(&env, id) {
            panic_with_error!(&env, Error::PlanExists);
        }
        if rate < 0 || min_amount < 0 || min_amount > max_amount {
            panic_with_error!(&env, Error::InvalidTargetConfig);
        }

        let config = types::PlanConfig {
            id,
            duration_days,
            rate,
            min_amount,
            max_amount,
        };
        let state = types::PlanState {
            active,
            total_staked: 0,
        };
        storage::save_plan(&env, &config, &state);

        events::plan_created(
            &env,
            events::PlanCreated {
                id,
                duration_days,
                rate,
                min_amount,
                max_amount,
                active,
            },
        );
        Plan::from_parts(config, state)
    }

    /// Activate or deactivate a plan. Setting the flag to its current value
    /// is rejected.
    pub fn set_plan_active(env: Env, caller: Address, id: u64, active: bool) {
        access::require_admin(&env, &caller);
        let mut state = storage::load_plan_state(&env, id);
        if state.active == active {
            panic_with_error!(&env, Error::StatusUnchanged);
        }
        state.active = active;
        storage::save_plan_state(&env, id, &state);
        events::plan_state_changed(&env, events::PlanStateChanged { id, active });
    }

    // ─────────────────────────────────────────────────────────
    // Plans — holder surface
    // ─────────────────────────────────────────────────────────

    /// Stake into an active plan. Immediate confirmation; the maturity clock
    /// starts now. A repeat stake accumulates into the open record and keeps
    /// the original start time.
    pub fn stake(env: Env, holder: Address, id: u64, amount: i128) {
        holder.require_auth();
        let config = storage::load_plan_config(&env, id);
        let mut state = storage::load_plan_state(&env, id);
        if !state.active {
            panic_with_error!(&env, Error::StatusNotAllowed);
        }
        Self::check_bounds(&env, amount, config.min_amount, config.max_amount);

        let now = env.ledger().timestamp();
        let record = match storage::load_deposit(&env, &holder, id, true) {
            Some(mut existing) if existing.state == DepositState::Confirmed => {
                if existing.amount + amount > config.max_amount {
                    panic_with_error!(&env, Error::AmountAboveMaximum);
                }
                existing.amount += amount;
                existing
            }
            // A withdrawn slot re-opens with a fresh clock.
            _ => DepositRecord {
                amount,
                start_time: now,
                state: DepositState::Confirmed,
                via_queue: false,
            },
        };

        let asset = token::Client::new(&env, &storage::get_asset(&env));
        asset.transfer_from(
            &env.current_contract_address(),
            &holder,
            &env.current_contract_address(),
            &amount,
        );

        storage::save_deposit(&env, &holder, id, true, &record);
        storage::note_holder_target(&env, &holder, id, true);
        state.total_staked += amount;
        storage::save_plan_state(&env, id, &state);

        events::plan_staked(&env, events::PlanStaked { id, holder, amount });
    }

    /// Withdraw a matured plan stake: principal plus the plan's linear
    /// reward in a single transfer.
    pub fn unstake(env: Env, holder: Address, id: u64) {
        holder.require_auth();
        let config = storage::load_plan_config(&env, id);
        let mut record = match storage::load_deposit(&env, &holder, id, true) {
            Some(record) => record,
            None => panic_with_error!(&env, Error::RecordNotFound),
        };
        if record.state == DepositState::Withdrawn {
            panic_with_error!(&env, Error::AlreadyWithdrawn);
        }

        let now = env.ledger().timestamp();
        if !rewards::is_mature_days(now, record.start_time, config.duration_days) {
            panic_with_error!(&env, Error::DurationNotPassed);
        }

        let principal = record.amount;
        let reward = rewards::reward(principal, config.rate);

        // Seal the record before the outbound transfer.
        record.state = DepositState::Withdrawn;
        storage::save_deposit(&env, &holder, id, true, &record);

        let asset = token::Client::new(&env, &storage::get_asset(&env));
        asset.transfer(&env.current_contract_address(), &holder, &(principal + reward));

        events::plan_unstaked(
            &env,
            events::PlanUnstaked {
                id,
                holder,
                principal,
                reward,
            },
        );
    }

    // ─────────────────────────────────────────────────────────
    // Plans — queries
    // ─────────────────────────────────────────────────────────

    /// Retrieve a plan by its id.
    pub fn get_plan(env: Env, id: u64) -> Plan {
        storage::load_plan(&env, id)
    }

    /// The holder's deposit record against a plan.
    pub fn get_plan_deposit(env: Env, holder: Address, id: u64) -> DepositRecord {
        match storage::load_deposit(&env, &holder, id, true) {
            Some(record) => record,
            None => panic_with_error!(&env, Error::RecordNotFound),
        }
    }

    /// Whole days left until the holder's plan stake matures.
    pub fn get_plan_remaining_duration(env: Env, holder: Address, id: u64) -> u64 {
        let config = storage::load_plan_config(&env, id);
        let record = match storage::load_deposit(&env, &holder, id, true) {
            Some(record) => record,
            None => panic_with_error!(&env, Error::RecordNotFound),
        };
        rewards::remaining_days(env.ledger().timestamp(), &record, config.duration_days)
    }

    /// Reward the holder's plan stake would pay if withdrawn now; zero
    /// before maturity.
    pub fn get_plan_reward(env: Env, holder: Address, id: u64) -> i128 {
        let config = storage::load_plan_config(&env, id);
        let record = match storage::load_deposit(&env, &holder, id, true) {
            Some(record) => record,
            None => panic_with_error!(&env, Error::RecordNotFound),
        };
        if record.state != DepositState::Confirmed {
            return 0;
        }
        let now = env.ledger().timestamp();
        if !rewards::is_mature_days(now, record.start_time, config.duration_days) {
            return 0;
        }
        rewards::reward(record.amount, config.rate)
    }

    /// Plan ids for which the holder has an open (non-withdrawn) record, in
    /// first-deposit order.
    pub fn get_staked_plans(env: Env, holder: Address) -> Vec<u64> {
        let mut open = Vec::new(&env);
        for id in storage::load_holder_targets(&env, &holder, true).iter() {
            if let Some(record) = storage::load_deposit(&env, &holder, id, true) {
                if record.state != DepositState::Withdrawn {
                    open.push_back(id);
                }
            }
        }
        open
    }

    // ─────────────────────────────────────────────────────────
    // Tiered staking — administrator surface
    // ─────────────────────────────────────────────────────────

    /// Replace the whole 6x6 rate matrix. Effective for subsequent stakes
    /// only; open positions keep their frozen rate.
    pub fn update_rate_table(env: Env, caller: Address, rates: Vec<Vec<i128>>) {
        access::require_admin(&env, &caller);
        tiers::set_rates(&env, &rates);
        events::rate_table_updated(&env);
    }

    /// Replace the six amount-tier `[min, max)` bounds. The bounds must be
    /// contiguous and non-overlapping.
    pub fn update_tier_bounds(env: Env, caller: Address, mins: Vec<i128>, maxs: Vec<i128>) {
        access::require_admin(&env, &caller);
        tiers::set_bounds(&env, &mins, &maxs);
        events::tier_bounds_updated(&env);
    }

    /// Replace the six approved duration values (whole months; `0` is the
    /// flexible duration).
    pub fn update_duration_set(env: Env, caller: Address, months: Vec<u32>) {
        access::require_admin(&env, &caller);
        tiers::set_months(&env, &months);
        events::duration_set_updated(&env);
    }

    /// Replace the global amount envelope for new positions.
    pub fn update_stake_range(env: Env, caller: Address, min: i128, max: i128) {
        access::require_admin(&env, &caller);
        tiers::set_range(&env, min, max);
        events::stake_range_updated(&env, events::StakeRangeUpdated { min, max });
    }

    // ─────────────────────────────────────────────────────────
    // Tiered staking — holder surface
    // ─────────────────────────────────────────────────────────

    /// Current rate for `amount` staked for `months` whole months. `months`
    /// is a duration value that must be a member of the configured set.
    pub fn get_apr(env: Env, amount: i128, months: u32) -> i128 {
        tiers::get_rate(&env, amount, months)
    }

    /// Open a tiered-staking position. The rate is looked up in the current
    /// tier table and frozen into the position. Returns the position index;
    /// indices are append-only and never reused.
    pub fn open_position(env: Env, holder: Address, amount: i128, months: u32) -> u32 {
        holder.require_auth();

        let range = storage::load_stake_range(&env);
        if amount < range.min || amount > range.max {
            panic_with_error!(&env, Error::AmountOutOfRange);
        }
        let config = storage::load_tier_config(&env);
        if config.months.first_index_of(months).is_none() {
            panic_with_error!(&env, Error::InvalidStakeDuration);
        }
        let rate = tiers::get_rate(&env, amount, months);

        let asset = token::Client::new(&env, &storage::get_asset(&env));
        asset.transfer_from(
            &env.current_contract_address(),
            &holder,
            &env.current_contract_address(),
            &amount,
        );

        let mut positions = storage::load_positions(&env, &holder);
        let index = positions.len();
        positions.push_back(Position {
            amount,
            months,
            rate,
            start_time: env.ledger().timestamp(),
            withdrawn: false,
        });
        storage::save_positions(&env, &holder, &positions);

        events::position_opened(
            &env,
            events::PositionOpened {
                holder,
                index,
                amount,
                months,
                rate,
            },
        );
        index
    }

    /// Close a matured position: pays `amount + amount * rate / RATE_SCALE`
    /// and seals the position. The index stays valid forever.
    pub fn close_position(env: Env, holder: Address, index: u32) {
        holder.require_auth();
        let mut positions = storage::load_positions(&env, &holder);
        let mut position = match positions.get(index) {
            Some(position) => position,
            None => panic_with_error!(&env, Error::StakeIndexOutOfBounds),
        };
        if position.withdrawn {
            panic_with_error!(&env, Error::AlreadyWithdrawn);
        }

        let now = env.ledger().timestamp();
        if !rewards::is_mature_months(now, position.start_time, position.months) {
            panic_with_error!(&env, Error::DurationNotPassed);
        }

        let principal = position.amount;
        let interest = rewards::reward(principal, position.rate);

        // Seal the position before the outbound transfer.
        position.withdrawn = true;
        positions.set(index, position);
        storage::save_positions(&env, &holder, &positions);

        let asset = token::Client::new(&env, &storage::get_asset(&env));
        asset.transfer(
            &env.current_contract_address(),
            &holder,
            &(principal + interest),
        );

        events::position_closed(
            &env,
            events::PositionClosed {
                holder,
                index,
                principal,
                interest,
            },
        );
    }

    /// Interest a position pays at its frozen rate. Pure read; usable before
    /// or after maturity and after withdrawal.
    pub fn calculate_interest(env: Env, holder: Address, index: u32) -> i128 {
        let positions = storage::load_positions(&env, &holder);
        let position = match positions.get(index) {
            Some(position) => position,
            None => panic_with_error!(&env, Error::StakeIndexOutOfBounds),
        };
        rewards::reward(position.amount, position.rate)
    }

    /// All of the holder's positions, open and closed, in index order.
    pub fn get_positions(env: Env, holder: Address) -> Vec<Position> {
        storage::load_positions(&env, &holder)
    }

    /// The current tier-table configuration.
    pub fn get_tier_table(env: Env) -> TierConfig {
        storage::load_tier_config(&env)
    }

    /// The current global amount envelope.
    pub fn get_stake_range(env: Env) -> StakeRange {
        storage::load_stake_range(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Internal helpers
    // ─────────────────────────────────────────────────────────

    /// Shared campaign admission path for `contribute` and `queue_up`.
    fn admit_campaign_deposit(env: &Env, holder: &Address, id: u64, amount: i128, queued: bool) {
        holder.require_auth();
        let config = storage::load_campaign_config(env, id);
        let mut state = storage::load_campaign_state(env, id);
        if state.status != CampaignStatus::Funding {
            panic_with_error!(env, Error::StatusNotAllowed);
        }
        Self::check_bounds(env, amount, config.min_amount, config.max_amount);
        Self::check_membership(env, holder);

        let now = env.ledger().timestamp();
        let open_state = if queued {
            DepositState::Queued
        } else {
            DepositState::Confirmed
        };

        let (record, newly_queued) = match storage::load_deposit(env, holder, id, false) {
            Some(mut existing) if existing.state != DepositState::Withdrawn => {
                // Accumulation is only allowed through the same admission
                // path the open record came in on.
                if existing.state != open_state {
                    panic_with_error!(env, Error::RecordConflict);
                }
                if existing.amount + amount > config.max_amount {
                    panic_with_error!(env, Error::AmountAboveMaximum);
                }
                existing.amount += amount;
                (existing, false)
            }
            // No record, or a withdrawn slot re-opening with a fresh clock.
            _ => (
                DepositRecord {
                    amount,
                    start_time: now,
                    state: open_state,
                    via_queue: queued,
                },
                queued,
            ),
        };

        if queued {
            state.total_queued += amount;
        } else {
            if state.total_committed + amount > config.max_amount {
                panic_with_error!(env, Error::CapacityExceeded);
            }
            state.total_committed += amount;
        }

        let asset = token::Client::new(env, &storage::get_asset(env));
        asset.transfer_from(
            &env.current_contract_address(),
            holder,
            &env.current_contract_address(),
            &amount,
        );

        storage::save_deposit(env, holder, id, false, &record);
        storage::note_holder_target(env, holder, id, false);
        if newly_queued {
            let mut queue = storage::load_queue(env, id);
            queue.push_back(holder.clone());
            storage::save_queue(env, id, &queue);
        }
        storage::save_campaign_state(env, id, &state);

        events::deposit_accepted(
            env,
            events::DepositAccepted {
                id,
                holder: holder.clone(),
                amount,
                queued,
            },
        );
    }

    /// Per-record bounds check against the values frozen at creation time.
    fn check_bounds(env: &Env, amount: i128, min_amount: i128, max_amount: i128) {
        if amount <= 0 || amount < min_amount {
            panic_with_error!(env, Error::AmountBelowMinimum);
        }
        if amount > max_amount {
            panic_with_error!(env, Error::AmountAboveMaximum);
        }
    }

    /// Membership gate: the holder must carry the configured minimum of the
    /// membership asset. A zero minimum admits everyone.
    fn check_membership(env: &Env, holder: &Address) {
        let minimum = storage::get_membership_minimum(env);
        if minimum <= 0 {
            return;
        }
        let membership = token::Client::new(env, &storage::get_membership_asset(env));
        if membership.balance(holder) < minimum {
            panic_with_error!(env, Error::MembershipBelowMinimum);
        }
    }
}
