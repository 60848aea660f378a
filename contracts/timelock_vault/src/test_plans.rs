extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

use crate::rewards::SECONDS_PER_DAY;
use crate::{DepositState, Error, TimelockVault, TimelockVaultClient, RATE_SCALE};

const TOKEN: i128 = 10_000_000;

fn setup() -> (
    Env,
    TimelockVaultClient<'static>,
    Address,
    token::Client<'static>,
    token::StellarAssetClient<'static>,
) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(TimelockVault, ());
    let client = TimelockVaultClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let asset = env.register_stellar_asset_contract_v2(token_admin.clone());
    let membership = env.register_stellar_asset_contract_v2(token_admin.clone());
    client.init(&admin, &asset.address(), &membership.address());

    let asset_client = token::Client::new(&env, &asset.address());
    let asset_sac = token::StellarAssetClient::new(&env, &asset.address());
    (env, client, admin, asset_client, asset_sac)
}

fn fund(
    env: &Env,
    client: &TimelockVaultClient,
    sac: &token::StellarAssetClient,
    holder: &Address,
    amount: i128,
) {
    sac.mint(holder, &amount);
    let expiration = env.ledger().sequence() + 100_000;
    token::Client::new(env, &sac.address).approve(holder, &client.address, &amount, &expiration);
}

fn pct(percent: i128) -> i128 {
    percent * RATE_SCALE / 100
}

fn advance_days(env: &Env, days: u64) {
    env.ledger().with_mut(|li| {
        li.timestamp += days * SECONDS_PER_DAY;
    });
}

#[test]
fn admin_creates_plan() {
    let (_env, client, admin, _asset, _sac) = setup();
    let plan = client.create_plan(&admin, &1, &100, &pct(2), &0, &(5_000 * TOKEN), &true);
    assert_eq!(plan.id, 1);
    assert_eq!(plan.duration_days, 100);
    assert!(plan.active);
    assert_eq!(client.get_plan(&1), plan);
}

#[test]
fn non_admin_cannot_create_plan() {
    let (env, client, _admin, _asset, _sac) = setup();
    let stranger = Address::generate(&env);
    assert_eq!(
        client.try_create_plan(&stranger, &2, &100, &pct(5), &0, &(5_000 * TOKEN), &true),
        Err(Ok(Error::NotAuthorized))
    );
}

#[test]
fn duplicate_plan_id_rejected() {
    let (_env, client, admin, _asset, _sac) = setup();
    client.create_plan(&admin, &1, &100, &pct(2), &0, &(5_000 * TOKEN), &true);
    assert_eq!(
        client.try_create_plan(&admin, &1, &30, &pct(1), &0, &(5_000 * TOKEN), &false),
        Err(Ok(Error::PlanExists))
    );
}

#[test]
fn negative_rate_rejected_at_creation() {
    let (_env, client, admin, _asset, _sac) = setup();
    assert_eq!(
        client.try_create_plan(&admin, &1, &30, &(-1), &0, &(5_000 * TOKEN), &true),
        Err(Ok(Error::InvalidTargetConfig))
    );
    // A zero rate is a valid principal-only plan.
    client.create_plan(&admin, &1, &30, &0, &0, &(5_000 * TOKEN), &true);
}

#[test]
fn plan_toggle_rejects_current_value() {
    let (_env, client, admin, _asset, _sac) = setup();
    client.create_plan(&admin, &1, &100, &pct(2), &0, &(5_000 * TOKEN), &true);
    assert_eq!(
        client.try_set_plan_active(&admin, &1, &true),
        Err(Ok(Error::StatusUnchanged))
    );
    client.set_plan_active(&admin, &1, &false);
    assert!(!client.get_plan(&1).active);
    assert_eq!(
        client.try_set_plan_active(&admin, &1, &false),
        Err(Ok(Error::StatusUnchanged))
    );
    client.set_plan_active(&admin, &1, &true);
}

#[test]
fn staking_requires_an_active_plan() {
    let (env, client, admin, _asset, sac) = setup();
    client.create_plan(&admin, &1, &30, &pct(2), &0, &(5_000 * TOKEN), &false);
    let holder = Address::generate(&env);
    fund(&env, &client, &sac, &holder, 100 * TOKEN);
    assert_eq!(
        client.try_stake(&holder, &1, &(100 * TOKEN)),
        Err(Ok(Error::StatusNotAllowed))
    );
}

#[test]
fn staking_enforces_bounds() {
    let (env, client, admin, _asset, sac) = setup();
    let min = 100 * TOKEN;
    let max = 1_000 * TOKEN;
    client.create_plan(&admin, &1, &30, &pct(2), &min, &max, &true);
    let holder = Address::generate(&env);
    fund(&env, &client, &sac, &holder, 2_000 * TOKEN);

    assert_eq!(
        client.try_stake(&holder, &1, &(min - 1)),
        Err(Ok(Error::AmountBelowMinimum))
    );
    assert_eq!(
        client.try_stake(&holder, &1, &(max + 1)),
        Err(Ok(Error::AmountAboveMaximum))
    );
    client.stake(&holder, &1, &max);
}

#[test]
fn unknown_plan_is_reported() {
    let (env, client, _admin, _asset, _sac) = setup();
    let holder = Address::generate(&env);
    assert_eq!(
        client.try_stake(&holder, &99, &(100 * TOKEN)),
        Err(Ok(Error::PlanNotFound))
    );
}

#[test]
fn unstake_before_maturity_fails() {
    let (env, client, admin, _asset, sac) = setup();
    client.create_plan(&admin, &1, &100, &pct(2), &0, &(5_000 * TOKEN), &true);
    let holder = Address::generate(&env);
    fund(&env, &client, &sac, &holder, 100 * TOKEN);
    client.stake(&holder, &1, &(100 * TOKEN));

    assert_eq!(
        client.try_unstake(&holder, &1),
        Err(Ok(Error::DurationNotPassed))
    );
}

#[test]
fn fresh_stake_reads_full_duration_and_zero_reward() {
    let (env, client, admin, _asset, sac) = setup();
    client.create_plan(&admin, &1, &30, &pct(15), &0, &(5_000 * TOKEN), &true);
    let holder = Address::generate(&env);
    fund(&env, &client, &sac, &holder, 100 * TOKEN);
    client.stake(&holder, &1, &(100 * TOKEN));

    assert_eq!(client.get_plan_remaining_duration(&holder, &1), 30);
    assert_eq!(client.get_plan_reward(&holder, &1), 0);
}

#[test]
fn unstake_pays_principal_plus_reward() {
    let (env, client, admin, asset, sac) = setup();
    client.create_plan(&admin, &1, &1, &pct(1), &0, &(5_000 * TOKEN), &true);
    let holder = Address::generate(&env);
    fund(&env, &client, &sac, &holder, 100 * TOKEN);
    sac.mint(&client.address, &(100 * TOKEN));

    client.stake(&holder, &1, &(100 * TOKEN));
    advance_days(&env, 1);
    assert_eq!(client.get_plan_reward(&holder, &1), 1 * TOKEN);
    client.unstake(&holder, &1);

    assert_eq!(asset.balance(&holder), 101 * TOKEN);
    assert_eq!(
        client.get_plan_deposit(&holder, &1).state,
        DepositState::Withdrawn
    );
}

#[test]
fn double_unstake_fails() {
    let (env, client, admin, _asset, sac) = setup();
    client.create_plan(&admin, &1, &1, &pct(1), &0, &(5_000 * TOKEN), &true);
    let holder = Address::generate(&env);
    fund(&env, &client, &sac, &holder, 100 * TOKEN);
    sac.mint(&client.address, &(100 * TOKEN));

    client.stake(&holder, &1, &(100 * TOKEN));
    advance_days(&env, 1);
    client.unstake(&holder, &1);
    assert_eq!(
        client.try_unstake(&holder, &1),
        Err(Ok(Error::AlreadyWithdrawn))
    );
}

#[test]
fn repeat_stake_accumulates_into_the_open_record() {
    let (env, client, admin, _asset, sac) = setup();
    client.create_plan(&admin, &1, &30, &pct(2), &0, &(5_000 * TOKEN), &true);
    let holder = Address::generate(&env);
    fund(&env, &client, &sac, &holder, 300 * TOKEN);

    client.stake(&holder, &1, &(100 * TOKEN));
    let first = client.get_plan_deposit(&holder, &1);
    advance_days(&env, 5);
    client.stake(&holder, &1, &(200 * TOKEN));

    let record = client.get_plan_deposit(&holder, &1);
    assert_eq!(record.amount, 300 * TOKEN);
    assert_eq!(record.start_time, first.start_time);
    assert_eq!(client.get_plan(&1).total_staked, 300 * TOKEN);
}

#[test]
fn staked_plan_listing_tracks_open_records() {
    let (env, client, admin, _asset, sac) = setup();
    client.create_plan(&admin, &1, &1, &pct(1), &0, &(5_000 * TOKEN), &true);
    client.create_plan(&admin, &2, &1, &pct(1), &0, &(5_000 * TOKEN), &true);
    let holder = Address::generate(&env);
    assert_eq!(client.get_staked_plans(&holder).len(), 0);

    fund(&env, &client, &sac, &holder, 200 * TOKEN);
    sac.mint(&client.address, &(100 * TOKEN));
    client.stake(&holder, &2, &(100 * TOKEN));
    client.stake(&holder, &1, &(100 * TOKEN));
    assert_eq!(client.get_staked_plans(&holder), soroban_sdk::vec![&env, 2, 1]);

    advance_days(&env, 1);
    client.unstake(&holder, &2);
    assert_eq!(client.get_staked_plans(&holder), soroban_sdk::vec![&env, 1]);
}
