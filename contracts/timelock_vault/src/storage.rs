//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key                 | Type         | Description                         |
//! |---------------------|--------------|-------------------------------------|
//! | `Admin`             | `Address`    | The single administrator            |
//! | `Asset`             | `Address`    | Deposited fungible asset            |
//! | `MembershipAsset`   | `Address`    | Secondary asset for the gate        |
//! | `MembershipMinimum` | `i128`       | Gate threshold (0 = disabled)       |
//! | `Tiers`             | `TierConfig` | 6x6 tier table                      |
//! | `Range`             | `StakeRange` | Global tiered-staking envelope      |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day
//! remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                        | Type            | Description                |
//! |----------------------------|-----------------|----------------------------|
//! | `CampConfig(id)`           | `CampaignConfig`| Immutable campaign config  |
//! | `CampState(id)`            | `CampaignState` | Mutable campaign state     |
//! | `Queue(id)`                | `Vec<Address>`  | FIFO queued holders        |
//! | `PlanConfig(id)`           | `PlanConfig`    | Immutable plan config      |
//! | `PlanState(id)`            | `PlanState`     | Mutable plan state         |
//! | `Deposit(holder, id)`      | `DepositRecord` | Campaign deposit slot      |
//! | `PlanDeposit(holder, id)`  | `DepositRecord` | Plan deposit slot          |
//! | `HolderCampaigns(holder)`  | `Vec<u64>`      | Ids in first-deposit order |
//! | `HolderPlans(holder)`      | `Vec<u64>`      | Ids in first-deposit order |
//! | `Positions(holder)`        | `Vec<Position>` | Append-only position list  |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days
//! remaining.
//!
//! ## Why split Config and State?
//!
//! Deposits are high-frequency writes. `CampaignState` is a few dozen bytes;
//! rewriting the full campaign on every deposit would cost several times
//! that. The split also makes the immutability of bounds and rate structural
//! rather than a convention.

use soroban_sdk::{contracttype, panic_with_error, Address, Env, Vec};

use crate::types::{
    CampaignConfig, CampaignState, DepositRecord, Plan, PlanConfig, PlanState, Position,
    StakeRange, TierConfig,
};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
///
/// Instance-tier keys live as long as the contract and are extended together.
/// Persistent-tier keys hold per-campaign / per-plan / per-holder data with
/// independent TTLs.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Administrator address (Instance).
    Admin,
    /// Deposited fungible asset address (Instance).
    Asset,
    /// Membership asset address for the eligibility gate (Instance).
    MembershipAsset,
    /// Minimum membership-asset holding; 0 disables the gate (Instance).
    MembershipMinimum,
    /// Tier-table configuration (Instance).
    Tiers,
    /// Global tiered-staking amount envelope (Instance).
    Range,
    /// Immutable campaign configuration keyed by id (Persistent).
    CampConfig(u64),
    /// Mutable campaign state keyed by id (Persistent).
    CampState(u64),
    /// FIFO list of holders with queued records (Persistent).
    Queue(u64),
    /// Immutable plan configuration keyed by id (Persistent).
    PlanConfig(u64),
    /// Mutable plan state keyed by id (Persistent).
    PlanState(u64),
    /// Campaign deposit slot keyed by (holder, campaign id) (Persistent).
    Deposit(Address, u64),
    /// Plan deposit slot keyed by (holder, plan id) (Persistent).
    PlanDeposit(Address, u64),
    /// Campaign ids a holder has deposited into, first-deposit order (Persistent).
    HolderCampaigns(Address),
    /// Plan ids a holder has staked into, first-deposit order (Persistent).
    HolderPlans(Address),
    /// Append-only tiered-staking positions for a holder (Persistent).
    Positions(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

/// Store the administrator and asset addresses. Called once from `init`.
pub fn save_init_config(env: &Env, admin: &Address, asset: &Address, membership_asset: &Address) {
    let instance = env.storage().instance();
    instance.set(&DataKey::Admin, admin);
    instance.set(&DataKey::Asset, asset);
    instance.set(&DataKey::MembershipAsset, membership_asset);
    instance.set(&DataKey::MembershipMinimum, &0i128);
    bump_instance(env);
}

pub fn get_admin(env: &Env) -> Address {
    bump_instance(env);
    match env.storage().instance().get(&DataKey::Admin) {
        Some(admin) => admin,
        None => panic_with_error!(env, Error::NotAuthorized),
    }
}

pub fn get_asset(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Asset)
        .expect("asset not set")
}

pub fn get_membership_asset(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::MembershipAsset)
        .expect("membership asset not set")
}

pub fn get_membership_minimum(env: &Env) -> i128 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::MembershipMinimum)
        .unwrap_or(0)
}

pub fn set_membership_minimum(env: &Env, minimum: i128) {
    env.storage()
        .instance()
        .set(&DataKey::MembershipMinimum, &minimum);
    bump_instance(env);
}

pub fn save_tier_config(env: &Env, tiers: &TierConfig) {
    env.storage().instance().set(&DataKey::Tiers, tiers);
    bump_instance(env);
}

pub fn load_tier_config(env: &Env) -> TierConfig {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Tiers)
        .expect("tier table not set")
}

pub fn save_stake_range(env: &Env, range: &StakeRange) {
    env.storage().instance().set(&DataKey::Range, range);
    bump_instance(env);
}

pub fn load_stake_range(env: &Env) -> StakeRange {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Range)
        .expect("stake range not set")
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn has_campaign(env: &Env, id: u64) -> bool {
    env.storage().persistent().has(&DataKey::CampConfig(id))
}

/// Save both the immutable config and initial mutable state for a new campaign.
pub fn save_campaign(env: &Env, config: &CampaignConfig, state: &CampaignState) {
    let config_key = DataKey::CampConfig(config.id);
    let state_key = DataKey::CampState(config.id);
    env.storage().persistent().set(&config_key, config);
    env.storage().persistent().set(&state_key, state);
    bump_persistent(env, &config_key);
    bump_persistent(env, &state_key);
}

/// Load only the immutable campaign configuration.
pub fn load_campaign_config(env: &Env, id: u64) -> CampaignConfig {
    let key = DataKey::CampConfig(id);
    let config: CampaignConfig = match env.storage().persistent().get(&key) {
        Some(config) => config,
        None => panic_with_error!(env, Error::CampaignNotFound),
    };
    bump_persistent(env, &key);
    config
}

/// Load only the mutable campaign state.
pub fn load_campaign_state(env: &Env, id: u64) -> CampaignState {
    let key = DataKey::CampState(id);
    let state: CampaignState = match env.storage().persistent().get(&key) {
        Some(state) => state,
        None => panic_with_error!(env, Error::CampaignNotFound),
    };
    bump_persistent(env, &key);
    state
}

/// Save only the mutable campaign state (the hot write path).
pub fn save_campaign_state(env: &Env, id: u64, state: &CampaignState) {
    let key = DataKey::CampState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

/// FIFO list of holders with queued deposits for a campaign.
pub fn load_queue(env: &Env, id: u64) -> Vec<Address> {
    let key = DataKey::Queue(id);
    let queue = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| Vec::new(env));
    if !queue.is_empty() {
        bump_persistent(env, &key);
    }
    queue
}

pub fn save_queue(env: &Env, id: u64, queue: &Vec<Address>) {
    let key = DataKey::Queue(id);
    env.storage().persistent().set(&key, queue);
    bump_persistent(env, &key);
}

pub fn has_plan(env: &Env, id: u64) -> bool {
    env.storage().persistent().has(&DataKey::PlanConfig(id))
}

/// Save both the immutable config and initial mutable state for a new plan.
pub fn save_plan(env: &Env, config: &PlanConfig, state: &PlanState) {
    let config_key = DataKey::PlanConfig(config.id);
    let state_key = DataKey::PlanState(config.id);
    env.storage().persistent().set(&config_key, config);
    env.storage().persistent().set(&state_key, state);
    bump_persistent(env, &config_key);
    bump_persistent(env, &state_key);
}

pub fn load_plan_config(env: &Env, id: u64) -> PlanConfig {
    let key = DataKey::PlanConfig(id);
    let config: PlanConfig = match env.storage().persistent().get(&key) {
        Some(config) => config,
        None => panic_with_error!(env, Error::PlanNotFound),
    };
    bump_persistent(env, &key);
    config
}

pub fn load_plan_state(env: &Env, id: u64) -> PlanState {
    let key = DataKey::PlanState(id);
    let state: PlanState = match env.storage().persistent().get(&key) {
        Some(state) => state,
        None => panic_with_error!(env, Error::PlanNotFound),
    };
    bump_persistent(env, &key);
    state
}

pub fn save_plan_state(env: &Env, id: u64, state: &PlanState) {
    let key = DataKey::PlanState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

/// Load the full `Plan` by combining config and state.
pub fn load_plan(env: &Env, id: u64) -> Plan {
    Plan::from_parts(load_plan_config(env, id), load_plan_state(env, id))
}

// ── Deposit records ──────────────────────────────────────────────────

fn deposit_key(holder: &Address, id: u64, plan: bool) -> DataKey {
    if plan {
        DataKey::PlanDeposit(holder.clone(), id)
    } else {
        DataKey::Deposit(holder.clone(), id)
    }
}

/// Load a holder's deposit slot, if any. `plan` selects the plan namespace.
pub fn load_deposit(env: &Env, holder: &Address, id: u64, plan: bool) -> Option<DepositRecord> {
    let key = deposit_key(holder, id, plan);
    let record: Option<DepositRecord> = env.storage().persistent().get(&key);
    if record.is_some() {
        bump_persistent(env, &key);
    }
    record
}

pub fn save_deposit(env: &Env, holder: &Address, id: u64, plan: bool, record: &DepositRecord) {
    let key = deposit_key(holder, id, plan);
    env.storage().persistent().set(&key, record);
    bump_persistent(env, &key);
}

/// Record `id` in the holder's first-deposit-order target list, once.
pub fn note_holder_target(env: &Env, holder: &Address, id: u64, plan: bool) {
    let key = if plan {
        DataKey::HolderPlans(holder.clone())
    } else {
        DataKey::HolderCampaigns(holder.clone())
    };
    let mut ids: Vec<u64> = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| Vec::new(env));
    if !ids.contains(&id) {
        ids.push_back(id);
        env.storage().persistent().set(&key, &ids);
    }
    bump_persistent(env, &key);
}

/// All target ids the holder ever deposited into, in first-deposit order.
pub fn load_holder_targets(env: &Env, holder: &Address, plan: bool) -> Vec<u64> {
    let key = if plan {
        DataKey::HolderPlans(holder.clone())
    } else {
        DataKey::HolderCampaigns(holder.clone())
    };
    let ids = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| Vec::new(env));
    if !ids.is_empty() {
        bump_persistent(env, &key);
    }
    ids
}

// ── Tiered-staking positions ─────────────────────────────────────────

pub fn load_positions(env: &Env, holder: &Address) -> Vec<Position> {
    let key = DataKey::Positions(holder.clone());
    let positions = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| Vec::new(env));
    if !positions.is_empty() {
        bump_persistent(env, &key);
    }
    positions
}

pub fn save_positions(env: &Env, holder: &Address, positions: &Vec<Position>) {
    let key = DataKey::Positions(holder.clone());
    env.storage().persistent().set(&key, positions);
    bump_persistent(env, &key);
}
