extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

use crate::rewards::SECONDS_PER_DAY;
use crate::{CampaignStatus, DepositState, Error, TimelockVault, TimelockVaultClient, RATE_SCALE};

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

fn advance_days(env: &Env, days: u64) {
    env.ledger().with_mut(|li| {
        li.timestamp += days * SECONDS_PER_DAY;
    });
}

/// Campaign with capacity 2000, duration 30 days, 2% rate, accepting funding.
fn queue_campaign(client: &TimelockVaultClient, admin: &Address) -> u64 {
    client.create_campaign(
        admin,
        &1,
        &30,
        &(2 * RATE_SCALE / 100),
        &0,
        &(2_000 * TOKEN),
        &CampaignStatus::Funding,
    );
    1
}

#[test]
fn queue_up_records_queued_and_pulls_funds() {
    let (env, client, admin, asset, sac) = setup();
    let id = queue_campaign(&client, &admin);
    let holder = Address::generate(&env);
    fund(&env, &client, &sac, &holder, 1_000 * TOKEN);

    client.queue_up(&holder, &id, &(1_000 * TOKEN));

    assert_eq!(asset.balance(&holder), 0);
    assert_eq!(asset.balance(&client.address), 1_000 * TOKEN);
    let record = client.get_deposit(&holder, &id);
    assert_eq!(record.state, DepositState::Queued);
    assert!(record.via_queue);
    let campaign = client.get_campaign(&id);
    assert_eq!(campaign.total_queued, 1_000 * TOKEN);
    assert_eq!(campaign.total_committed, 0);
}

#[test]
fn queued_record_cannot_withdraw_before_allocation() {
    let (env, client, admin, _asset, sac) = setup();
    let id = queue_campaign(&client, &admin);
    let holder = Address::generate(&env);
    fund(&env, &client, &sac, &holder, 1_000 * TOKEN);
    client.queue_up(&holder, &id, &(1_000 * TOKEN));

    advance_days(&env, 31);
    assert_eq!(
        client.try_uncontribute(&holder, &id),
        Err(Ok(Error::StatusNotAllowed))
    );
}

#[test]
fn allocate_requires_admin() {
    let (env, client, admin, _asset, _sac) = setup();
    let id = queue_campaign(&client, &admin);
    let stranger = Address::generate(&env);
    assert_eq!(
        client.try_allocate(&stranger, &id),
        Err(Ok(Error::NotAuthorized))
    );
}

#[test]
fn allocate_confirms_in_queue_order_and_refunds_what_does_not_fit() {
    let (env, client, admin, asset, sac) = setup();
    let id = queue_campaign(&client, &admin);

    let first = Address::generate(&env);
    let second = Address::generate(&env);
    let third = Address::generate(&env);
    fund(&env, &client, &sac, &first, 1_200 * TOKEN);
    fund(&env, &client, &sac, &second, 700 * TOKEN);
    fund(&env, &client, &sac, &third, 900 * TOKEN);

    client.queue_up(&first, &id, &(1_200 * TOKEN));
    client.queue_up(&second, &id, &(700 * TOKEN));
    // 1200 + 700 fit in 2000; 900 does not.
    client.queue_up(&third, &id, &(900 * TOKEN));

    client.allocate(&admin, &id);

    assert_eq!(client.get_deposit(&first, &id).state, DepositState::Confirmed);
    assert_eq!(
        client.get_deposit(&second, &id).state,
        DepositState::Confirmed
    );
    // The third holder is refunded in full and the record closed.
    assert_eq!(
        client.get_deposit(&third, &id).state,
        DepositState::Withdrawn
    );
    assert_eq!(asset.balance(&third), 900 * TOKEN);

    let campaign = client.get_campaign(&id);
    assert_eq!(campaign.total_committed, 1_900 * TOKEN);
    assert_eq!(campaign.total_queued, 0);
    crate::invariants::assert_capacity_respected(&campaign);
    crate::invariants::assert_totals_non_negative(&campaign);
}

#[test]
fn allocate_exactly_at_capacity_confirms_everyone() {
    let (env, client, admin, _asset, sac) = setup();
    let id = queue_campaign(&client, &admin);

    let first = Address::generate(&env);
    let second = Address::generate(&env);
    fund(&env, &client, &sac, &first, 1_500 * TOKEN);
    fund(&env, &client, &sac, &second, 500 * TOKEN);

    client.queue_up(&first, &id, &(1_500 * TOKEN));
    client.queue_up(&second, &id, &(500 * TOKEN));
    client.allocate(&admin, &id);

    assert_eq!(client.get_campaign(&id).total_committed, 2_000 * TOKEN);
    assert_eq!(client.get_deposit(&first, &id).state, DepositState::Confirmed);
    assert_eq!(
        client.get_deposit(&second, &id).state,
        DepositState::Confirmed
    );
}

#[test]
fn allocation_stamps_the_maturity_clock() {
    let (env, client, admin, _asset, sac) = setup();
    let id = queue_campaign(&client, &admin);
    let holder = Address::generate(&env);
    fund(&env, &client, &sac, &holder, 1_000 * TOKEN);
    sac.mint(&client.address, &(1_000 * TOKEN));

    client.queue_up(&holder, &id, &(1_000 * TOKEN));

    // Ten days in the queue do not count towards maturity.
    advance_days(&env, 10);
    client.allocate(&admin, &id);
    client.change_status(&admin, &id, &CampaignStatus::Fulfilled);

    advance_days(&env, 29);
    assert_eq!(
        client.try_uncontribute(&holder, &id),
        Err(Ok(Error::DurationNotPassed))
    );

    advance_days(&env, 1);
    client.uncontribute(&holder, &id);
}

#[test]
fn allocate_with_empty_queue_is_a_noop() {
    let (env, client, admin, _asset, sac) = setup();
    let id = queue_campaign(&client, &admin);
    let holder = Address::generate(&env);
    fund(&env, &client, &sac, &holder, 1_000 * TOKEN);
    client.queue_up(&holder, &id, &(1_000 * TOKEN));

    client.allocate(&admin, &id);
    let after_first = client.get_campaign(&id);

    // Nothing queued any more; a second run changes nothing and is not an
    // error.
    client.allocate(&admin, &id);
    assert_eq!(client.get_campaign(&id), after_first);
}

#[test]
fn queued_withdrawal_needs_a_post_funding_status() {
    let (env, client, admin, _asset, sac) = setup();
    let id = queue_campaign(&client, &admin);
    let holder = Address::generate(&env);
    fund(&env, &client, &sac, &holder, 1_000 * TOKEN);
    sac.mint(&client.address, &(1_000 * TOKEN));

    client.queue_up(&holder, &id, &(1_000 * TOKEN));
    client.allocate(&admin, &id);

    advance_days(&env, 30);
    // Mature, but the campaign is still accepting funding.
    assert_eq!(
        client.try_uncontribute(&holder, &id),
        Err(Ok(Error::StatusNotAllowed))
    );

    client.change_status(&admin, &id, &CampaignStatus::NotFulfilled);
    client.uncontribute(&holder, &id);
}

#[test]
fn repeat_queue_up_accumulates_one_queue_slot() {
    let (env, client, admin, _asset, sac) = setup();
    let id = queue_campaign(&client, &admin);
    let holder = Address::generate(&env);
    fund(&env, &client, &sac, &holder, 1_000 * TOKEN);

    client.queue_up(&holder, &id, &(400 * TOKEN));
    client.queue_up(&holder, &id, &(600 * TOKEN));

    let record = client.get_deposit(&holder, &id);
    assert_eq!(record.state, DepositState::Queued);
    assert_eq!(record.amount, 1_000 * TOKEN);
    assert_eq!(client.get_campaign(&id).total_queued, 1_000 * TOKEN);

    client.allocate(&admin, &id);
    assert_eq!(client.get_campaign(&id).total_committed, 1_000 * TOKEN);
}
