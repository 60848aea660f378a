//! # Access
//!
//! Single-administrator capability. The administrator is fixed at `init`;
//! rotation is intentionally not supported. Every privileged entry point
//! funnels through [`require_admin`], which authenticates the caller and
//! rejects anyone but the stored administrator before any state is touched.

use soroban_sdk::{panic_with_error, Address, Env};

use crate::storage;
use crate::Error;

/// Store the administrator on first call; trap on a repeat call.
pub fn init_admin(env: &Env, admin: &Address, asset: &Address, membership_asset: &Address) {
    if storage::is_initialized(env) {
        panic_with_error!(env, Error::AlreadyInitialized);
    }
    storage::save_init_config(env, admin, asset, membership_asset);
}

/// Authenticate `caller` and require it to be the administrator.
///
/// Auth first: an unauthenticated transaction must fail on the signature,
/// not on the comparison, so the error surface stays uniform.
pub fn require_admin(env: &Env, caller: &Address) {
    caller.require_auth();
    if *caller != storage::get_admin(env) {
        panic_with_error!(env, Error::NotAuthorized);
    }
}
