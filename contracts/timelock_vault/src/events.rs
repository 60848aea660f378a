//! # Events
//!
//! Every externally observable transition publishes a typed payload so that
//! off-chain observers and indexers can follow the ledger without replaying
//! storage. Topics are `(symbol_short!(..), target id)` pairs where a target
//! id exists, bare symbols otherwise.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::types::CampaignStatus;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCreated {
    pub id: u64,
    pub duration_days: u64,
    pub rate: i128,
    pub min_amount: i128,
    pub max_amount: i128,
    pub status: CampaignStatus,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignStatusChanged {
    pub id: u64,
    pub old_status: CampaignStatus,
    pub new_status: CampaignStatus,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositAccepted {
    pub id: u64,
    pub holder: Address,
    pub amount: i128,
    /// True when the deposit went through the allocation queue.
    pub queued: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllocationCompleted {
    pub id: u64,
    pub confirmed_total: i128,
    pub refunded_total: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalCompleted {
    pub id: u64,
    pub holder: Address,
    pub principal: i128,
    pub reward: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlanCreated {
    pub id: u64,
    pub duration_days: u64,
    pub rate: i128,
    pub min_amount: i128,
    pub max_amount: i128,
    pub active: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlanStateChanged {
    pub id: u64,
    pub active: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlanStaked {
    pub id: u64,
    pub holder: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlanUnstaked {
    pub id: u64,
    pub holder: Address,
    pub principal: i128,
    pub reward: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionOpened {
    pub holder: Address,
    pub index: u32,
    pub amount: i128,
    pub months: u32,
    pub rate: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionClosed {
    pub holder: Address,
    pub index: u32,
    pub principal: i128,
    pub interest: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MembershipMinimumUpdated {
    pub minimum: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeRangeUpdated {
    pub min: i128,
    pub max: i128,
}

pub fn campaign_created(env: &Env, data: CampaignCreated) {
    env.events()
        .publish((symbol_short!("created"), data.id), data);
}

pub fn campaign_status_changed(env: &Env, data: CampaignStatusChanged) {
    env.events()
        .publish((symbol_short!("status"), data.id), data);
}

pub fn deposit_accepted(env: &Env, data: DepositAccepted) {
    env.events()
        .publish((symbol_short!("deposit"), data.id), data);
}

pub fn allocation_completed(env: &Env, data: AllocationCompleted) {
    env.events()
        .publish((symbol_short!("allocated"), data.id), data);
}

pub fn withdrawal_completed(env: &Env, data: WithdrawalCompleted) {
    env.events()
        .publish((symbol_short!("withdraw"), data.id), data);
}

pub fn plan_created(env: &Env, data: PlanCreated) {
    env.events().publish((symbol_short!("plan"), data.id), data);
}

pub fn plan_state_changed(env: &Env, data: PlanStateChanged) {
    env.events()
        .publish((symbol_short!("planstate"), data.id), data);
}

pub fn plan_staked(env: &Env, data: PlanStaked) {
    env.events()
        .publish((symbol_short!("staked"), data.id), data);
}

pub fn plan_unstaked(env: &Env, data: PlanUnstaked) {
    env.events()
        .publish((symbol_short!("unstaked"), data.id), data);
}

pub fn position_opened(env: &Env, data: PositionOpened) {
    env.events().publish((symbol_short!("opened"),), data);
}

pub fn position_closed(env: &Env, data: PositionClosed) {
    env.events().publish((symbol_short!("closed"),), data);
}

pub fn membership_minimum_updated(env: &Env, data: MembershipMinimumUpdated) {
    env.events().publish((symbol_short!("member"),), data);
}

/// Tier-table replacement notifications carry no payload beyond the topic;
/// observers re-read the table through the query surface.
pub fn rate_table_updated(env: &Env) {
    env.events().publish((symbol_short!("aprtable"),), ());
}

pub fn tier_bounds_updated(env: &Env) {
    env.events().publish((symbol_short!("tierbnds"),), ());
}

pub fn duration_set_updated(env: &Env) {
    env.events().publish((symbol_short!("months"),), ());
}

pub fn stake_range_updated(env: &Env, data: StakeRangeUpdated) {
    env.events().publish((symbol_short!("range"),), data);
}
